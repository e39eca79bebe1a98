//! Deterministic collision core
//!
//! Everything the mover needs to resolve one frame of motion lives here.
//! This module must stay pure and deterministic:
//! - No clock, no RNG
//! - Stable candidate order
//! - Whole-unit motion only (fractions are carried, never dropped)
//! - No rendering or platform dependencies

pub mod collision;
pub mod mover;
pub mod observer;
pub mod rect;
pub mod state;
pub mod subpixel;
pub mod tile;

pub use collision::{TileProbe, cell_edge, test_tile_collision};
pub use mover::MapMover;
pub use observer::{CollisionObserver, DebugTrace, NoopObserver, TraceEvent};
pub use rect::{Axis, Edge, Rect};
pub use state::CollisionState;
pub use subpixel::SubpixelFloat;
pub use tile::{TileKind, TileRef};
