//! Collision tile shapes
//!
//! Tiles are a closed set of shapes, so every capability query is an
//! exhaustive match rather than a property lookup.

use serde::{Deserialize, Serialize};

use super::rect::Edge;
use crate::map::TileTransform;

/// Shape of a colliding tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TileKind {
    /// Fully solid cell
    Flat,
    /// Floor slope, solid below its surface line.
    ///
    /// `offset` is the tile-local Y of the surface at the tile's left edge and
    /// `rise / run` is its gradient. Y grows downward, so a positive rise
    /// means the surface drops toward the right.
    Slope { rise: f32, run: f32, offset: f32 },
    /// Only collides when landed on from above
    OneWayPlatform,
}

impl TileKind {
    /// Build a slope from the tile-local surface heights at both sides
    pub fn slope_from_heights(top_left: f32, top_right: f32, tile_width: f32) -> Self {
        TileKind::Slope {
            rise: top_right - top_left,
            run: tile_width,
            offset: top_left,
        }
    }

    #[inline]
    pub fn is_slope(&self) -> bool {
        matches!(self, TileKind::Slope { .. })
    }

    #[inline]
    pub fn is_one_way_platform(&self) -> bool {
        matches!(self, TileKind::OneWayPlatform)
    }

    /// Surface gradient (rise over run). Zero for anything but a slope.
    pub fn slope(&self) -> f32 {
        match *self {
            TileKind::Slope { rise, run, .. } if run != 0.0 => rise / run,
            _ => 0.0,
        }
    }

    /// Tile-local surface Y at the left edge. Zero for anything but a slope.
    pub fn slope_offset(&self) -> f32 {
        match *self {
            TileKind::Slope { offset, .. } => offset,
            _ => 0.0,
        }
    }

    /// Side on which the slope surface sits highest (smallest Y). A level
    /// slope reports `Right`.
    pub fn highest_slope_edge(&self) -> Edge {
        match *self {
            TileKind::Slope { rise, .. } if rise > 0.0 => Edge::Left,
            _ => Edge::Right,
        }
    }
}

/// A tile as found in a layer: grid coordinates plus shape.
///
/// This is a plain lookup key; holding one does not borrow the layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRef {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    pub kind: TileKind,
}

impl TileRef {
    pub fn new(x: i32, y: i32, kind: TileKind) -> Self {
        Self { x, y, kind }
    }

    #[inline]
    pub fn is_slope(&self) -> bool {
        self.kind.is_slope()
    }

    #[inline]
    pub fn is_one_way_platform(&self) -> bool {
        self.kind.is_one_way_platform()
    }

    #[inline]
    pub fn slope(&self) -> f32 {
        self.kind.slope()
    }

    #[inline]
    pub fn slope_offset(&self) -> f32 {
        self.kind.slope_offset()
    }

    #[inline]
    pub fn highest_slope_edge(&self) -> Edge {
        self.kind.highest_slope_edge()
    }

    /// Which vertical side of the cell is closer to world X `position`
    pub fn nearest_edge<T: TileTransform + ?Sized>(&self, position: f32, transform: &T) -> Edge {
        let left = transform.tile_to_world_x(self.x);
        let right = transform.tile_to_world_x(self.x + 1);
        if position < (left + right) * 0.5 {
            Edge::Left
        } else {
            Edge::Right
        }
    }

    /// World Y of the slope surface at world X `position`, clamped to the
    /// cell's own horizontal span. Flat-topped shapes report the cell top.
    pub fn surface_y_at<T: TileTransform + ?Sized>(&self, position: f32, transform: &T) -> f32 {
        let left = transform.tile_to_world_x(self.x);
        let right = transform.tile_to_world_x(self.x + 1);
        let top = transform.tile_to_world_y(self.y);
        let dx = (position - left).clamp(0.0, right - left);
        self.slope() * dx + self.slope_offset() + top
    }
}
