//! Tile Mover - swept box collision against tile maps
//!
//! Core modules:
//! - `sim`: Deterministic collision core (mover, tile tests, per-entity state)
//! - `map`: Tile-map traits and the in-memory `GridMap`
//! - `settings`: Mover tuning, persisted as JSON
//! - `demo`: Seeded terrain and a walker driving the mover

pub mod demo;
pub mod map;
pub mod settings;
pub mod sim;

pub use map::{GridMap, MapError, TileLayer, TileMap, TileTransform};
pub use settings::{MoverSettings, SettingsError};
pub use sim::{CollisionState, Edge, MapMover, Rect, TileKind, TileRef};

/// Mover and demo constants
pub mod consts {
    /// Inset applied to the left and right of vertical swept rects
    pub const DEFAULT_HORIZONTAL_INSET: f32 = 2.0;
    /// Inset applied to the top and bottom of horizontal swept rects
    pub const DEFAULT_VERTICAL_INSET: f32 = 6.0;
    /// Extra push below a ceiling hit found by the head check
    pub const LEDGE_BUMP_DEFLECTION: f32 = 2.0;

    /// Demo tile size (square)
    pub const TILE_SIZE: f32 = 16.0;
    /// Fixed demo timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Downward acceleration, units/s²
    pub const GRAVITY: f32 = 900.0;
    /// Terminal fall speed, units/s
    pub const MAX_FALL_SPEED: f32 = 480.0;
    pub const WALK_SPEED: f32 = 90.0;
    /// Upward launch speed, units/s
    pub const JUMP_VELOCITY: f32 = 320.0;
}
