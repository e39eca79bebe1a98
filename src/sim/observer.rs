//! Debug hooks into the mover
//!
//! Rendering swept rects and hit tiles is a host concern. The mover only
//! reports what it tested; hosts decide what to draw or log.

use super::rect::{Edge, Rect};
use super::tile::TileRef;

/// Receives mover events during a collision test. All methods default to
/// no-ops.
pub trait CollisionObserver {
    /// A swept rectangle is about to be tested against the map
    fn swept_rect(&mut self, _direction: Edge, _rect: &Rect) {}
    /// A present tile is being considered
    fn candidate(&mut self, _direction: Edge, _tile: &TileRef) {}
    /// A tile produced a collision response
    fn hit(&mut self, _direction: Edge, _tile: &TileRef, _response: f32) {}
    /// Grounding was kept through slope stickiness
    fn sticky(&mut self, _tile: &TileRef, _response: f32) {}
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CollisionObserver for NoopObserver {}

/// A recorded mover event
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Swept { direction: Edge, rect: Rect },
    Candidate { direction: Edge, tile: TileRef },
    Hit { direction: Edge, tile: TileRef, response: f32 },
    Sticky { tile: TileRef, response: f32 },
}

/// Records every event, in order
#[derive(Debug, Clone, Default)]
pub struct DebugTrace {
    pub events: Vec<TraceEvent>,
}

impl DebugTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Swept rects tested so far (what a debug overlay would draw)
    pub fn swept_rects(&self) -> impl Iterator<Item = &Rect> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Swept { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn hits(&self) -> impl Iterator<Item = (&Edge, &TileRef, f32)> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Hit {
                direction,
                tile,
                response,
            } => Some((direction, tile, *response)),
            _ => None,
        })
    }

    pub fn sticky_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Sticky { .. }))
            .count()
    }
}

impl CollisionObserver for DebugTrace {
    fn swept_rect(&mut self, direction: Edge, rect: &Rect) {
        self.events.push(TraceEvent::Swept {
            direction,
            rect: *rect,
        });
    }

    fn candidate(&mut self, direction: Edge, tile: &TileRef) {
        self.events.push(TraceEvent::Candidate {
            direction,
            tile: *tile,
        });
    }

    fn hit(&mut self, direction: Edge, tile: &TileRef, response: f32) {
        self.events.push(TraceEvent::Hit {
            direction,
            tile: *tile,
            response,
        });
    }

    fn sticky(&mut self, tile: &TileRef, response: f32) {
        self.events.push(TraceEvent::Sticky {
            tile: *tile,
            response,
        });
    }
}
