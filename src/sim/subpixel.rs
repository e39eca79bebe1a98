//! Fractional motion carry-over
//!
//! Collision tests only deal in whole units. Whatever fraction gets truncated
//! off a frame's motion is banked here and paid back once it adds up to a
//! whole unit.

use serde::{Deserialize, Serialize};

/// Running sub-unit remainder for one axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubpixelFloat {
    remainder: f32,
}

impl SubpixelFloat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `amount` into the remainder and replace it with the whole-unit
    /// part (truncated toward zero). The fraction stays banked.
    pub fn update(&mut self, amount: &mut f32) {
        self.remainder += *amount;
        let whole = self.remainder.trunc();
        self.remainder -= whole;
        *amount = whole;
    }

    /// Drop the banked fraction
    #[inline]
    pub fn reset(&mut self) {
        self.remainder = 0.0;
    }

    #[inline]
    pub fn remainder(&self) -> f32 {
        self.remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fraction_accumulates_into_whole_unit() {
        let mut sp = SubpixelFloat::new();
        let mut moved = Vec::new();
        for _ in 0..4 {
            let mut m = 0.3;
            sp.update(&mut m);
            moved.push(m);
        }
        assert_eq!(moved, vec![0.0, 0.0, 0.0, 1.0]);
        assert!((sp.remainder() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_negative_motion_truncates_toward_zero() {
        let mut sp = SubpixelFloat::new();
        let mut m = -2.75;
        sp.update(&mut m);
        assert_eq!(m, -2.0);
        assert!((sp.remainder() + 0.75).abs() < 1e-6);

        let mut m = -0.5;
        sp.update(&mut m);
        assert_eq!(m, -1.0);
        assert!((sp.remainder() + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_reset_discards_carry() {
        let mut sp = SubpixelFloat::new();
        let mut m = 0.9;
        sp.update(&mut m);
        sp.reset();
        let mut m = 0.2;
        sp.update(&mut m);
        assert_eq!(m, 0.0);
        assert!((sp.remainder() - 0.2).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_motion_is_conserved(steps in prop::collection::vec(-3.0f32..3.0, 1..60)) {
            let mut sp = SubpixelFloat::new();
            let mut emitted = 0.0f64;
            let mut requested = 0.0f64;
            for step in steps {
                let mut m = step;
                sp.update(&mut m);
                prop_assert_eq!(m, m.trunc());
                prop_assert!(sp.remainder().abs() < 1.0);
                emitted += m as f64;
                requested += step as f64;
            }
            prop_assert!((emitted + sp.remainder() as f64 - requested).abs() < 1e-3);
        }
    }
}
