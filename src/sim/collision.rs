//! Per-tile collision tests
//!
//! The tricky part of the mover: deciding whether one tile stops a swept
//! rectangle, and where the stopping surface is. Flat tiles are simple cell
//! edges; slopes and one-way platforms each bend the rules.

use super::rect::{Edge, Rect};
use super::tile::{TileKind, TileRef};
use crate::map::TileTransform;

/// What is being tested against a tile
#[derive(Debug, Clone, Copy)]
pub struct TileProbe {
    /// Side of the tile that would be struck (opposite the travel direction)
    pub edge: Edge,
    /// Center of the swept rect on the axis perpendicular to travel
    pub perpendicular: f32,
    /// Swept rect side facing the travel direction
    pub leading: f32,
    /// Swept rect side facing away from the travel direction
    pub trailing: f32,
    /// Slopes only get their own surface math on vertical passes
    pub test_slopes: bool,
}

/// World coordinate of one side of a tile's cell
pub fn cell_edge<T: TileTransform + ?Sized>(map: &T, tile: &TileRef, edge: Edge) -> f32 {
    match edge {
        Edge::Top => map.tile_to_world_y(tile.y),
        Edge::Bottom => map.tile_to_world_y(tile.y + 1),
        Edge::Left => map.tile_to_world_x(tile.x),
        Edge::Right => map.tile_to_world_x(tile.x + 1),
    }
}

/// Test one tile against a probe.
///
/// `bounds` is the collider before this frame's movement. Returns the world
/// coordinate the leading side should stop at, or `None` when the tile does
/// not block.
pub fn test_tile_collision<T: TileTransform + ?Sized>(
    map: &T,
    tile: &TileRef,
    probe: &TileProbe,
    bounds: &Rect,
) -> Option<f32> {
    let edge = probe.edge;

    // One-way platforms only block from above, and only once we are over them
    if tile.is_one_way_platform() {
        if edge != Edge::Top {
            return None;
        }
        let top = map.tile_to_world_y(tile.y);
        return (bounds.bottom() <= top).then_some(top);
    }

    // Moving sideways, a slope is only a wall when its tall side faces us and
    // we were not already inside the cell. Stops clipping through: -> |\
    let mut force_wall = false;
    if edge.is_horizontal() && tile.is_slope() {
        let move_dir = edge.opposite();
        let leading_pre_move = bounds.side(move_dir);
        if tile.nearest_edge(leading_pre_move, map) == tile.highest_slope_edge() {
            let was_inside = if move_dir == Edge::Right {
                leading_pre_move > map.tile_to_world_x(tile.x)
            } else {
                leading_pre_move < map.tile_to_world_x(tile.x + 1)
            };
            force_wall = !was_inside;
        }
    }

    if force_wall || !tile.is_slope() {
        return Some(cell_edge(map, tile, edge));
    }

    if !probe.test_slopes {
        return None;
    }

    slope_response(map, tile, probe)
}

/// Surface math for a genuine slope test
fn slope_response<T: TileTransform + ?Sized>(
    map: &T,
    tile: &TileRef,
    probe: &TileProbe,
) -> Option<f32> {
    let TileKind::Slope { .. } = tile.kind else {
        return None;
    };

    match probe.edge {
        Edge::Top => {
            let surface = tile.surface_y_at(probe.perpendicular, map).floor();
            (probe.leading >= surface).then_some(surface)
        }
        // Solid sits below the surface line. Only a rect reaching under the
        // line touches it; one passing above it while jumping does not.
        Edge::Bottom => {
            let surface = tile.surface_y_at(probe.perpendicular, map).floor();
            (probe.trailing > surface).then(|| cell_edge(map, tile, Edge::Bottom))
        }
        Edge::Left | Edge::Right => {
            let slope = tile.slope();
            if slope == 0.0 {
                return None;
            }
            let tile_x = map.tile_to_world_x(tile.x);
            let tile_y = map.tile_to_world_y(tile.y);
            let x = ((probe.perpendicular - tile_y - tile.slope_offset()) / slope + tile_x).floor();
            let hit = if probe.edge.is_max() {
                probe.leading <= x
            } else {
                probe.leading >= x
            };
            hit.then_some(x)
        }
    }
}
