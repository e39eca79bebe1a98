//! Axis-aligned rectangle geometry for collider bounds
//!
//! World space has Y growing downward, so `Bottom` and `Right` are the
//! "max" sides of a box along their axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One side of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// The side facing the other way along the same axis
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// Left/Right
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Top/Bottom
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// True for the positive side along the edge's axis (Bottom, Right)
    #[inline]
    pub fn is_max(self) -> bool {
        matches!(self, Edge::Bottom | Edge::Right)
    }

    #[inline]
    pub fn is_min(self) -> bool {
        !self.is_max()
    }

    /// Axis along which moving toward this edge happens
    #[inline]
    pub fn axis(self) -> Axis {
        if self.is_horizontal() { Axis::X } else { Axis::Y }
    }
}

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Pick this axis' component out of a vector
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// An axis-aligned box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// World coordinate of the requested side
    #[inline]
    pub fn side(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top(),
            Edge::Bottom => self.bottom(),
            Edge::Left => self.left(),
            Edge::Right => self.right(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Shift the box by `offset`
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Copy of the box shifted by `offset`
    #[inline]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.translate(offset);
        self
    }

    /// Inset both horizontal sides by `horizontal` and both vertical sides by
    /// `vertical`. A dimension that would go negative collapses to zero
    /// around its center.
    pub fn contract(&mut self, horizontal: f32, vertical: f32) {
        let cx = self.x + self.width * 0.5;
        let cy = self.y + self.height * 0.5;

        self.width -= horizontal * 2.0;
        self.height -= vertical * 2.0;
        self.x += horizontal;
        self.y += vertical;

        if self.width < 0.0 {
            self.width = 0.0;
            self.x = cx;
        }
        if self.height < 0.0 {
            self.height = 0.0;
            self.y = cy;
        }
    }

    /// Grow the box outward on `edge` by `|amount|`
    pub fn expand_side(&mut self, edge: Edge, amount: f32) {
        let amount = amount.abs();
        match edge {
            Edge::Top => {
                self.y -= amount;
                self.height += amount;
            }
            Edge::Bottom => self.height += amount,
            Edge::Left => {
                self.x -= amount;
                self.width += amount;
            }
            Edge::Right => self.width += amount,
        }
    }

    /// The half of this box lying on `edge`'s side
    pub fn half_rect(&self, edge: Edge) -> Self {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        match edge {
            Edge::Top => Self::new(self.x, self.y, self.width, half_h),
            Edge::Bottom => Self::new(self.x, self.y + half_h, self.width, half_h),
            Edge::Left => Self::new(self.x, self.y, half_w, self.height),
            Edge::Right => Self::new(self.x + half_w, self.y, half_w, self.height),
        }
    }

    /// A sliver `size` thick running along `edge`, inside the box
    pub fn edge_portion(&self, edge: Edge, size: f32) -> Self {
        match edge {
            Edge::Top => Self::new(self.x, self.y, self.width, size),
            Edge::Bottom => Self::new(self.x, self.bottom() - size, self.width, size),
            Edge::Left => Self::new(self.x, self.y, size, self.height),
            Edge::Right => Self::new(self.right() - size, self.y, size, self.height),
        }
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EDGES: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    #[test]
    fn test_edge_helpers() {
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Left.opposite(), Edge::Right);
        assert!(Edge::Left.is_horizontal() && Edge::Right.is_horizontal());
        assert!(Edge::Top.is_vertical() && Edge::Bottom.is_vertical());
        assert!(Edge::Bottom.is_max() && Edge::Right.is_max());
        assert!(Edge::Top.is_min() && Edge::Left.is_min());
        assert_eq!(Edge::Right.axis(), Axis::X);
        assert_eq!(Axis::X.perpendicular(), Axis::Y);
    }

    #[test]
    fn test_sides_and_center() {
        let r = Rect::new(10.0, 20.0, 16.0, 32.0);
        assert_eq!(r.side(Edge::Left), 10.0);
        assert_eq!(r.side(Edge::Right), 26.0);
        assert_eq!(r.side(Edge::Top), 20.0);
        assert_eq!(r.side(Edge::Bottom), 52.0);
        assert_eq!(r.center(), Vec2::new(18.0, 36.0));
    }

    #[test]
    fn test_half_rect_and_edge_portion() {
        let r = Rect::new(0.0, 0.0, 16.0, 32.0);
        assert_eq!(r.half_rect(Edge::Bottom), Rect::new(0.0, 16.0, 16.0, 16.0));
        assert_eq!(r.half_rect(Edge::Left), Rect::new(0.0, 0.0, 8.0, 32.0));
        assert_eq!(r.edge_portion(Edge::Right, 1.0), Rect::new(15.0, 0.0, 1.0, 32.0));
        assert_eq!(r.edge_portion(Edge::Top, 1.0), Rect::new(0.0, 0.0, 16.0, 1.0));
    }

    #[test]
    fn test_expand_side_uses_magnitude() {
        let mut r = Rect::new(10.0, 10.0, 4.0, 4.0);
        r.expand_side(Edge::Left, -3.0);
        assert_eq!(r, Rect::new(7.0, 10.0, 7.0, 4.0));

        let mut r = Rect::new(10.0, 10.0, 4.0, 4.0);
        r.expand_side(Edge::Bottom, 5.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 4.0, 9.0));
    }

    #[test]
    fn test_contract_collapses_to_center() {
        let mut r = Rect::new(0.0, 0.0, 4.0, 20.0);
        r.contract(3.0, 2.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.x, 2.0);
        assert_eq!(r.height, 16.0);
        assert_eq!(r.y, 2.0);
    }

    proptest! {
        #[test]
        fn prop_opposite_is_involution(i in 0usize..4) {
            let e = EDGES[i];
            prop_assert_eq!(e.opposite().opposite(), e);
            prop_assert_ne!(e.opposite(), e);
            prop_assert_eq!(e.opposite().is_max(), !e.is_max());
        }

        #[test]
        fn prop_mutations_keep_size_non_negative(
            w in 0.0f32..64.0,
            h in 0.0f32..64.0,
            inset_h in 0.0f32..40.0,
            inset_v in 0.0f32..40.0,
            amount in -32.0f32..32.0,
            i in 0usize..4,
        ) {
            let mut r = Rect::new(5.0, 5.0, w, h).half_rect(EDGES[i]);
            r.contract(inset_h, inset_v);
            r.expand_side(EDGES[i], amount);
            prop_assert!(r.width >= 0.0);
            prop_assert!(r.height >= 0.0);
        }
    }
}
