//! Anchor planning for the ladder and snake overlay.
//!
//! Drawing is the presentation layer's job. This only pairs each edge with
//! the on-screen anchors of its two cells, skipping edges whose cells cannot
//! be located so a missing element never stalls the game.

use tracing::warn;

use super::topology::{Board, CellId, Edge};
use super::transition::TransitionKind;

/// Resolves a cell to its on-screen center.
pub trait CellLocator {
    fn locate(&self, cell: CellId) -> Option<(f32, f32)>;
}

impl<F> CellLocator for F
where
    F: Fn(CellId) -> Option<(f32, f32)>,
{
    fn locate(&self, cell: CellId) -> Option<(f32, f32)> {
        self(cell)
    }
}

/// An edge together with the centers of its start and end cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAnchors {
    pub kind: TransitionKind,
    pub edge: Edge,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl EdgeAnchors {
    #[must_use]
    pub fn length(&self) -> f32 {
        (self.end.0 - self.start.0).hypot(self.end.1 - self.start.1)
    }
}

impl Board {
    /// Anchors for every ladder, then every snake, that can be located.
    pub fn overlay_anchors(&self, locator: &impl CellLocator) -> Vec<EdgeAnchors> {
        let ladders = self.ladders().iter().map(|e| (TransitionKind::Ascent, e));
        let snakes = self.snakes().iter().map(|e| (TransitionKind::Descent, e));

        ladders
            .chain(snakes)
            .filter_map(|(kind, edge)| {
                match (locator.locate(edge.start), locator.locate(edge.end)) {
                    (Some(start), Some(end)) => Some(EdgeAnchors {
                        kind,
                        edge: *edge,
                        start,
                        end,
                    }),
                    _ => {
                        warn!(start = %edge.start, end = %edge.end, ?kind, "missing cell(s) for overlay edge");
                        None
                    }
                }
            })
            .collect()
    }
}
