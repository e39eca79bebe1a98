//! Per-entity collision state
//!
//! One `CollisionState` lives alongside each moving entity and is fed back
//! into the mover every frame. Grounding transitions, slope stickiness and
//! sub-pixel carry all depend on what happened on earlier frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::subpixel::SubpixelFloat;
use super::tile::TileRef;

/// Contact flags and cross-frame memory for one mover
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
    /// Landed this frame after not being grounded on the previous one
    pub became_grounded_this_frame: bool,
    pub was_grounded_last_frame: bool,
    pub is_grounded_on_one_way_platform: bool,
    /// Degrees, only meaningful while grounded on a slope
    pub slope_angle: f32,
    pub(crate) movement_remainder_x: SubpixelFloat,
    pub(crate) movement_remainder_y: SubpixelFloat,
    /// Tile we were last standing on
    pub(crate) last_ground_tile: Option<TileRef>,
}

impl CollisionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touching anything on any side
    #[inline]
    pub fn has_collision(&self) -> bool {
        self.below || self.right || self.left || self.above
    }

    /// Clear every contact flag and the slope angle
    pub fn reset(&mut self) {
        self.left = false;
        self.right = false;
        self.above = false;
        self.below = false;
        self.became_grounded_this_frame = false;
        self.is_grounded_on_one_way_platform = false;
        self.slope_angle = 0.0;
    }

    /// Start-of-frame reset. Flags on an axis without requested motion are
    /// cleared, then the sub-pixel carry is folded into `motion`, which comes
    /// back whole-unit on both axes.
    pub fn reset_for_motion(&mut self, mut motion: Vec2) -> Vec2 {
        if motion.x == 0.0 {
            self.left = false;
            self.right = false;
        }
        if motion.y == 0.0 {
            self.above = false;
            self.below = false;
        }
        self.became_grounded_this_frame = false;
        self.is_grounded_on_one_way_platform = false;
        self.slope_angle = 0.0;

        self.movement_remainder_x.update(&mut motion.x);
        self.movement_remainder_y.update(&mut motion.y);

        // Heavy quantization can round gravity down to nothing while grounded.
        // Slope tracking needs at least one unit of downward probe.
        if self.below && motion.y == 0.0 && self.movement_remainder_y.remainder() > 0.0 {
            motion.y = 1.0;
            self.movement_remainder_y.reset();
        }

        motion
    }

    #[inline]
    pub fn last_ground_tile(&self) -> Option<&TileRef> {
        self.last_ground_tile.as_ref()
    }

    #[inline]
    pub fn clear_last_ground_tile(&mut self) {
        self.last_ground_tile = None;
    }

    #[inline]
    pub fn remainder_x(&self) -> f32 {
        self.movement_remainder_x.remainder()
    }

    #[inline]
    pub fn remainder_y(&self) -> f32 {
        self.movement_remainder_y.remainder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TileKind;

    #[test]
    fn test_has_collision() {
        let mut state = CollisionState::new();
        assert!(!state.has_collision());
        state.left = true;
        assert!(state.has_collision());
        state.reset();
        assert!(!state.has_collision());
    }

    #[test]
    fn test_reset_clears_only_idle_axes() {
        let mut state = CollisionState {
            left: true,
            below: true,
            slope_angle: 30.0,
            became_grounded_this_frame: true,
            ..Default::default()
        };

        let motion = state.reset_for_motion(Vec2::new(0.0, 3.0));
        assert_eq!(motion, Vec2::new(0.0, 3.0));
        assert!(!state.left);
        assert!(state.below);
        assert_eq!(state.slope_angle, 0.0);
        assert!(!state.became_grounded_this_frame);
    }

    #[test]
    fn test_grounded_probe_forces_one_unit() {
        let mut state = CollisionState {
            below: true,
            ..Default::default()
        };
        let motion = state.reset_for_motion(Vec2::new(0.0, 0.25));
        assert_eq!(motion.y, 1.0);
        assert_eq!(state.remainder_y(), 0.0);

        // Airborne: the fraction is simply banked
        let mut state = CollisionState::default();
        let motion = state.reset_for_motion(Vec2::new(0.0, 0.25));
        assert_eq!(motion.y, 0.0);
        assert!((state.remainder_y() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_clear_last_ground_tile() {
        let mut state = CollisionState::new();
        state.last_ground_tile = Some(TileRef::new(1, 2, TileKind::Flat));
        assert!(state.last_ground_tile().is_some());
        state.clear_last_ground_tile();
        assert!(state.last_ground_tile().is_none());
    }
}
