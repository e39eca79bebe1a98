//! Tile-map collaborators consumed by the mover
//!
//! The mover never owns a map. It reads one through two small traits:
//! - `TileTransform`: world <-> grid coordinate conversion
//! - `TileLayer`: per-cell tile lookup
//!
//! `GridMap` is the in-memory implementation used by the demo and tests.

pub mod grid;

pub use grid::{GridMap, MapError};

use crate::sim::TileRef;

/// Converts between world coordinates and tile-grid indices.
///
/// Implementations must be monotonic and round-trip stable on cell
/// boundaries: `world_to_tile_x(tile_to_world_x(c)) == c`.
pub trait TileTransform {
    fn tile_to_world_x(&self, column: i32) -> f32;
    fn tile_to_world_y(&self, row: i32) -> f32;
    fn world_to_tile_x(&self, x: f32) -> i32;
    fn world_to_tile_y(&self, y: f32) -> i32;
}

/// Read-only access to the collision layer
pub trait TileLayer {
    fn columns(&self) -> i32;
    fn rows(&self) -> i32;
    /// Tile at a cell, `None` for empty or out-of-range cells
    fn tile(&self, column: i32, row: i32) -> Option<TileRef>;
}

/// Everything the mover needs from a map
pub trait TileMap: TileTransform + TileLayer {}

impl<T: TileTransform + TileLayer + ?Sized> TileMap for T {}
