//! Swept tile-map mover
//!
//! Resolves one frame of motion for a box collider against a tile map.
//! Horizontal motion is resolved first, then vertical motion using the
//! already-resolved horizontal offset, so corners never tunnel. A final
//! head check on downward frames fixes ledge bumps against slopes.

use glam::Vec2;

use super::collision::{TileProbe, test_tile_collision};
use super::observer::{CollisionObserver, NoopObserver};
use super::rect::{Axis, Edge, Rect};
use super::state::CollisionState;
use super::tile::TileRef;
use crate::map::TileMap;
use crate::settings::MoverSettings;

/// Moves box colliders through a borrowed tile map
#[derive(Debug)]
pub struct MapMover<'m, M: TileMap + ?Sized> {
    map: &'m M,
    settings: MoverSettings,
}

impl<'m, M: TileMap + ?Sized> MapMover<'m, M> {
    pub fn new(map: &'m M, settings: MoverSettings) -> Self {
        Self { map, settings }
    }

    pub fn map(&self) -> &'m M {
        self.map
    }

    pub fn settings(&self) -> &MoverSettings {
        &self.settings
    }

    /// Resolve `motion` for the collider at `bounds`, apply the allowed
    /// motion to `bounds` and return it.
    pub fn move_by(&self, motion: Vec2, bounds: &mut Rect, state: &mut CollisionState) -> Vec2 {
        let (allowed, next) = self.test_collisions(motion, *bounds, *state);
        *state = next;
        bounds.translate(allowed);
        allowed
    }

    /// Compute the motion actually permitted this frame and the collider's
    /// next collision state. `state` must be the one returned for this
    /// collider on the previous frame.
    pub fn test_collisions(
        &self,
        motion: Vec2,
        bounds: Rect,
        state: CollisionState,
    ) -> (Vec2, CollisionState) {
        self.test_collisions_observed(motion, bounds, state, &mut NoopObserver)
    }

    /// `test_collisions`, reporting every swept rect, candidate and hit to
    /// `observer`
    pub fn test_collisions_observed(
        &self,
        motion: Vec2,
        bounds: Rect,
        mut state: CollisionState,
        observer: &mut dyn CollisionObserver,
    ) -> (Vec2, CollisionState) {
        state.was_grounded_last_frame = state.below;
        let mut motion = state.reset_for_motion(motion);

        // Horizontal
        if motion.x != 0.0 {
            let direction = if motion.x > 0.0 { Edge::Right } else { Edge::Left };
            let swept = self.collision_rect_for_side(&bounds, direction, motion.x);

            match self.test_map_collision(&swept, direction, &bounds, &mut state, observer) {
                Some(response) => {
                    motion.x = response - bounds.side(direction);
                    state.left = direction == Edge::Left;
                    state.right = direction == Edge::Right;
                    state.movement_remainder_x.reset();
                }
                None => {
                    state.left = false;
                    state.right = false;
                }
            }
        }

        // Vertical
        let direction = if motion.y >= 0.0 { Edge::Bottom } else { Edge::Top };
        let mut swept = self.collision_rect_for_side(&bounds, direction, motion.y);
        swept.x += motion.x;

        match self.test_map_collision(&swept, direction, &bounds, &mut state, observer) {
            Some(response) => {
                motion.y = response - bounds.side(direction);
                state.above = direction == Edge::Top;
                state.below = direction == Edge::Bottom;
                state.movement_remainder_y.reset();

                if state.below {
                    if let Some(ground) = state.last_ground_tile.filter(TileRef::is_slope) {
                        state.slope_angle = ground.slope().atan().to_degrees();
                    }
                } else {
                    // Stopped by a ceiling: whatever we stood on is behind us
                    state.clear_last_ground_tile();
                }
            }
            None => {
                state.above = false;
                state.below = false;
                state.clear_last_ground_tile();
            }
        }

        // Moving down we also check the head. A jump that misses a ledge by
        // less than the vertical inset, or a slope overlapping from above,
        // would otherwise leave us hitched on top of it.
        if direction == Edge::Bottom {
            let mut head = self.collision_rect_for_side(&bounds, Edge::Top, 0.0);
            head.translate(motion);

            let hit = self.test_map_collision(&head, Edge::Top, &bounds, &mut state, observer);
            if let Some(response) = hit {
                motion.y = response - bounds.top() + self.settings.ledge_bump_deflection;
                state.above = true;
                log::debug!("Ledge bump: pushed down to {}", bounds.top() + motion.y);
            }
        }

        state.became_grounded_this_frame = !state.was_grounded_last_frame && state.below;
        if state.became_grounded_this_frame {
            log::debug!(
                "Landed at y={} (slope angle {:.1})",
                bounds.bottom() + motion.y,
                state.slope_angle
            );
        }

        (motion, state)
    }

    /// Find the first candidate tile that stops `rect` moving toward
    /// `direction`. Returns the world coordinate to stop at.
    pub(crate) fn test_map_collision(
        &self,
        rect: &Rect,
        direction: Edge,
        bounds: &Rect,
        state: &mut CollisionState,
        observer: &mut dyn CollisionObserver,
    ) -> Option<f32> {
        let side = direction.opposite();
        let perpendicular = direction.axis().perpendicular().of(rect.center());
        let probe = TileProbe {
            edge: side,
            perpendicular,
            leading: rect.side(direction),
            trailing: rect.side(side),
            test_slopes: side.is_vertical(),
        };

        observer.swept_rect(direction, rect);

        for tile in self.populate_colliding_tiles(rect, direction).into_iter().flatten() {
            observer.candidate(direction, &tile);

            // Riding a slope, tiles on its row are handled by the vertical
            // pass pushing us up. Blocking here would stall us on the slope.
            if direction.is_horizontal()
                && state
                    .last_ground_tile
                    .is_some_and(|ground| ground.is_slope() && ground.y == tile.y)
            {
                continue;
            }

            if let Some(response) = test_tile_collision(self.map, &tile, &probe, bounds) {
                if direction == Edge::Bottom {
                    state.last_ground_tile = Some(tile);
                    state.is_grounded_on_one_way_platform = tile.is_one_way_platform();
                }
                observer.hit(direction, &tile, response);
                return Some(response);
            }

            // Sticky slopes: while grounded, stay grounded across slope-to-slope
            // seams and from flat ground onto a slope whose tall side meets it
            if direction == Edge::Bottom && state.was_grounded_last_frame {
                if let Some(ground) = state.last_ground_tile {
                    let high_side_nearest = tile.is_slope()
                        && tile.nearest_edge(perpendicular, self.map) == tile.highest_slope_edge();
                    let slope_seam = ground.is_slope() && tile.is_slope();

                    if slope_seam || (!ground.is_slope() && high_side_nearest) {
                        let response = tile.surface_y_at(perpendicular, self.map).floor();
                        log::trace!(
                            "Sticky ground on tile ({}, {}) at y={response}",
                            tile.x,
                            tile.y
                        );
                        state.last_ground_tile = Some(tile);
                        observer.sticky(&tile, response);
                        return Some(response);
                    }
                }
            }
        }

        None
    }

    /// Tiles under `rect`, nearest the trailing side first along the travel
    /// axis, and starting from the end nearest the rect's center across it.
    /// Empty cells are kept as `None`.
    pub(crate) fn populate_colliding_tiles(
        &self,
        rect: &Rect,
        direction: Edge,
    ) -> Vec<Option<TileRef>> {
        let primary_axis = direction.axis();
        let secondary_axis = primary_axis.perpendicular();

        let Some((primary_min, primary_max)) = self.cell_span(rect, primary_axis) else {
            return Vec::new();
        };
        let Some((secondary_min, secondary_max)) = self.cell_span(rect, secondary_axis) else {
            return Vec::new();
        };

        let mid = self
            .world_to_tile(secondary_axis.of(rect.center()), secondary_axis)
            .clamp(secondary_min, secondary_max);
        let secondary_ascending = mid - secondary_min < secondary_max - mid;

        let primary: Vec<i32> = if direction.is_max() {
            (primary_min..=primary_max).collect()
        } else {
            (primary_min..=primary_max).rev().collect()
        };
        let secondary: Vec<i32> = if secondary_ascending {
            (secondary_min..=secondary_max).collect()
        } else {
            (secondary_min..=secondary_max).rev().collect()
        };

        let mut tiles = Vec::with_capacity(primary.len() * secondary.len());
        for &p in &primary {
            for &s in &secondary {
                let (column, row) = if primary_axis == Axis::X { (p, s) } else { (s, p) };
                tiles.push(self.map.tile(column, row));
            }
        }
        tiles
    }

    /// Inclusive cell range covered by `rect` along `axis`, clamped to the
    /// map. A max side sitting exactly on a cell boundary does not reach
    /// into the next cell.
    fn cell_span(&self, rect: &Rect, axis: Axis) -> Option<(i32, i32)> {
        let (lo, hi, limit) = match axis {
            Axis::X => (rect.left(), rect.right(), self.map.columns()),
            Axis::Y => (rect.top(), rect.bottom(), self.map.rows()),
        };

        let first = self.world_to_tile(lo, axis);
        let mut last = self.world_to_tile(hi, axis);
        if last > first && self.tile_to_world(last, axis) >= hi {
            last -= 1;
        }

        let first = first.max(0);
        let last = last.min(limit - 1);
        (first <= last).then_some((first, last))
    }

    #[inline]
    fn world_to_tile(&self, position: f32, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.map.world_to_tile_x(position),
            Axis::Y => self.map.world_to_tile_y(position),
        }
    }

    #[inline]
    fn tile_to_world(&self, cell: i32, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.map.tile_to_world_x(cell),
            Axis::Y => self.map.tile_to_world_y(cell),
        }
    }

    /// The swept rect for moving toward `side` by `motion`: a thin sliver for
    /// horizontal moves, the leading half of the box for vertical ones (so
    /// slopes can push us up).
    pub(crate) fn collision_rect_for_side(&self, bounds: &Rect, side: Edge, motion: f32) -> Rect {
        let mut rect = if side.is_horizontal() {
            bounds.edge_portion(side, 1.0)
        } else {
            bounds.half_rect(side)
        };

        if side.is_vertical() {
            rect.contract(self.settings.collider_horizontal_inset, 0.0);
        } else {
            rect.contract(0.0, self.settings.collider_vertical_inset);
        }

        rect.expand_side(side, motion);
        rect
    }
}
