//! In-memory tile grid
//!
//! Built from ASCII art for tests and the demo, or from JSON.
//!
//! ```text
//! .  or space   empty
//! #             solid
//! -             one-way platform
//! /             full slope rising to the right
//! \             full slope falling to the right
//! <             half-height slope rising to the right
//! >             half-height slope falling to the right
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TileLayer, TileTransform};
use crate::sim::{TileKind, TileRef};

/// Errors raised while building a map
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph { glyph: char, column: usize, row: usize },
    #[error("tile size must be positive and finite")]
    InvalidTileSize,
    #[error("cell ({column}, {row}) is outside the map")]
    OutOfBounds { column: i32, row: i32 },
    #[error("map size {columns}x{rows} is negative or too large")]
    InvalidDimensions { columns: i32, rows: i32 },
    #[error("map holds {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },
    #[error("invalid map json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Row-major grid of optional tiles with a world-space origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMap {
    /// World position of the top-left corner of cell (0, 0)
    #[serde(default)]
    pub origin: Vec2,
    pub tile_width: f32,
    pub tile_height: f32,
    columns: i32,
    rows: i32,
    tiles: Vec<Option<TileKind>>,
}

impl GridMap {
    /// Empty map of the given size
    pub fn new(columns: i32, rows: i32, tile_width: f32, tile_height: f32) -> Self {
        let columns = columns.max(0);
        let rows = rows.max(0);
        Self {
            origin: Vec2::ZERO,
            tile_width,
            tile_height,
            columns,
            rows,
            tiles: vec![None; columns as usize * rows as usize],
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if column < 0 || row < 0 || column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    /// Write (or clear, with `None`) a cell
    pub fn set_tile(
        &mut self,
        column: i32,
        row: i32,
        kind: Option<TileKind>,
    ) -> Result<(), MapError> {
        let idx = self
            .index(column, row)
            .ok_or(MapError::OutOfBounds { column, row })?;
        self.tiles[idx] = kind;
        Ok(())
    }

    /// Parse ASCII art (see module docs for the legend)
    pub fn parse(text: &str, tile_width: f32, tile_height: f32) -> Result<Self, MapError> {
        validate_tile_size(tile_width, tile_height)?;

        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(MapError::Empty);
        }

        let width = lines[0].chars().count();
        let mut map = Self::new(width as i32, lines.len() as i32, tile_width, tile_height);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let kind = glyph_to_tile(glyph, tile_width, tile_height)
                    .ok_or(MapError::UnknownGlyph { glyph, column, row })?;
                map.set_tile(column as i32, row as i32, kind)?;
            }
        }

        log::debug!("Parsed {}x{} tile map", map.columns, map.rows);
        Ok(map)
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let map: Self = serde_json::from_str(json)?;
        validate_tile_size(map.tile_width, map.tile_height)?;
        let expected = cell_count(map.columns, map.rows).ok_or(MapError::InvalidDimensions {
            columns: map.columns,
            rows: map.rows,
        })?;
        if map.tiles.len() != expected {
            return Err(MapError::TileCount {
                expected,
                found: map.tiles.len(),
            });
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string(self)?)
    }

    /// World-space bottom of the last row
    pub fn world_height(&self) -> f32 {
        self.tile_to_world_y(self.rows)
    }

    /// World-space right edge of the last column
    pub fn world_width(&self) -> f32 {
        self.tile_to_world_x(self.columns)
    }
}

/// Cells in a `columns` x `rows` grid, `None` for negative or overflowing sizes
fn cell_count(columns: i32, rows: i32) -> Option<usize> {
    let columns = usize::try_from(columns).ok()?;
    let rows = usize::try_from(rows).ok()?;
    columns.checked_mul(rows)
}

fn validate_tile_size(tile_width: f32, tile_height: f32) -> Result<(), MapError> {
    let ok = |s: f32| s.is_finite() && s > 0.0;
    if ok(tile_width) && ok(tile_height) {
        Ok(())
    } else {
        Err(MapError::InvalidTileSize)
    }
}

/// `None` for an unknown glyph, `Some(None)` for an empty cell
fn glyph_to_tile(glyph: char, w: f32, h: f32) -> Option<Option<TileKind>> {
    let kind = match glyph {
        '.' | ' ' => None,
        '#' => Some(TileKind::Flat),
        '-' => Some(TileKind::OneWayPlatform),
        '/' => Some(TileKind::slope_from_heights(h, 0.0, w)),
        '\\' => Some(TileKind::slope_from_heights(0.0, h, w)),
        '<' => Some(TileKind::slope_from_heights(h, h * 0.5, w)),
        '>' => Some(TileKind::slope_from_heights(h * 0.5, h, w)),
        _ => return None,
    };
    Some(kind)
}

impl TileTransform for GridMap {
    #[inline]
    fn tile_to_world_x(&self, column: i32) -> f32 {
        self.origin.x + column as f32 * self.tile_width
    }

    #[inline]
    fn tile_to_world_y(&self, row: i32) -> f32 {
        self.origin.y + row as f32 * self.tile_height
    }

    #[inline]
    fn world_to_tile_x(&self, x: f32) -> i32 {
        ((x - self.origin.x) / self.tile_width).floor() as i32
    }

    #[inline]
    fn world_to_tile_y(&self, y: f32) -> i32 {
        ((y - self.origin.y) / self.tile_height).floor() as i32
    }
}

impl TileLayer for GridMap {
    #[inline]
    fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    fn rows(&self) -> i32 {
        self.rows
    }

    fn tile(&self, column: i32, row: i32) -> Option<TileRef> {
        let idx = self.index(column, row)?;
        self.tiles
            .get(idx)
            .copied()
            .flatten()
            .map(|kind| TileRef::new(column, row, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legend() {
        let map = GridMap::parse(
            "\
.-/\\
#<> ",
            16.0,
            16.0,
        )
        .unwrap();

        assert_eq!(map.columns(), 4);
        assert_eq!(map.rows(), 2);
        assert!(map.tile(0, 0).is_none());
        assert!(map.tile(1, 0).unwrap().is_one_way_platform());
        assert_eq!(map.tile(2, 0).unwrap().slope(), -1.0);
        assert_eq!(map.tile(3, 0).unwrap().slope(), 1.0);
        assert_eq!(map.tile(0, 1).unwrap().kind, TileKind::Flat);
        assert_eq!(map.tile(1, 1).unwrap().slope(), -0.5);
        assert_eq!(map.tile(2, 1).unwrap().slope_offset(), 8.0);
        assert!(map.tile(3, 1).is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(GridMap::parse("", 16.0, 16.0), Err(MapError::Empty)));
        assert!(matches!(
            GridMap::parse("##\n#", 16.0, 16.0),
            Err(MapError::RaggedRow { row: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(
            GridMap::parse("#x", 16.0, 16.0),
            Err(MapError::UnknownGlyph { glyph: 'x', column: 1, row: 0 })
        ));
        assert!(matches!(
            GridMap::parse("#", 0.0, 16.0),
            Err(MapError::InvalidTileSize)
        ));
    }

    #[test]
    fn test_transform_round_trip_with_origin() {
        let map = GridMap::new(8, 8, 16.0, 8.0).with_origin(Vec2::new(-32.0, 4.0));
        for c in -2..10 {
            assert_eq!(map.world_to_tile_x(map.tile_to_world_x(c)), c);
            assert_eq!(map.world_to_tile_y(map.tile_to_world_y(c)), c);
        }
        assert_eq!(map.world_to_tile_x(-32.1), -1);
        assert_eq!(map.world_to_tile_y(11.9), 0);
        assert_eq!(map.world_to_tile_y(12.0), 1);
    }

    #[test]
    fn test_out_of_range_lookups() {
        let mut map = GridMap::new(2, 2, 16.0, 16.0);
        map.set_tile(1, 1, Some(TileKind::Flat)).unwrap();
        assert!(map.tile(-1, 0).is_none());
        assert!(map.tile(2, 0).is_none());
        assert!(map.tile(1, 1).is_some());
        assert!(matches!(
            map.set_tile(5, 0, Some(TileKind::Flat)),
            Err(MapError::OutOfBounds { column: 5, row: 0 })
        ));
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let map = GridMap::parse("#-\n/#", 16.0, 16.0).unwrap();
        let json = map.to_json().unwrap();
        let back = GridMap::from_json(&json).unwrap();
        assert_eq!(back.tile(1, 0).unwrap().kind, TileKind::OneWayPlatform);
        assert_eq!(back.tile(0, 1).unwrap().slope(), -1.0);

        let bad = r#"{"tile_width":16.0,"tile_height":16.0,"columns":2,"rows":2,"tiles":[null]}"#;
        assert!(matches!(
            GridMap::from_json(bad),
            Err(MapError::TileCount { expected: 4, found: 1 })
        ));
        assert!(matches!(GridMap::from_json("{"), Err(MapError::Json(_))));
    }

    #[test]
    fn test_json_rejects_bad_dimensions() {
        let negative = r#"{"tile_width":16.0,"tile_height":16.0,"columns":-3,"rows":2,"tiles":[]}"#;
        assert!(matches!(
            GridMap::from_json(negative),
            Err(MapError::InvalidDimensions { columns: -3, rows: 2 })
        ));

        // Product overflows i32: an error, not a panic
        let huge =
            r#"{"tile_width":16.0,"tile_height":16.0,"columns":65536,"rows":65536,"tiles":[]}"#;
        assert!(matches!(
            GridMap::from_json(huge),
            Err(MapError::TileCount { found: 0, .. } | MapError::InvalidDimensions { .. })
        ));

        assert_eq!(cell_count(i32::MAX, 0), Some(0));
        assert_eq!(cell_count(0, -1), None);
    }
}
