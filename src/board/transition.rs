//! Resolving a landing cell into its effective destination.

use serde::{Deserialize, Serialize};

use super::topology::{Board, CellId, Edge};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Snake head: the player slides down.
    Descent,
    /// Ladder foot: the player climbs up.
    Ascent,
}

/// A snake or ladder taken from a landing cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub edge: Edge,
}

impl Transition {
    #[must_use]
    pub fn is_descent(&self) -> bool {
        self.kind == TransitionKind::Descent
    }
}

/// Where a player ends up after landing on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landing {
    pub cell: CellId,
    pub transition: Option<Transition>,
}

impl Landing {
    /// Final cell after any snake or ladder.
    #[must_use]
    pub fn destination(&self) -> CellId {
        self.transition.map_or(self.cell, |t| t.edge.end)
    }
}

impl Board {
    /// Resolve a landing cell. Snakes are checked before ladders, though the
    /// standard layout never puts both on one cell.
    #[must_use]
    pub fn resolve(&self, cell: CellId) -> Landing {
        let transition = self
            .snake_at(cell)
            .map(|edge| Transition {
                kind: TransitionKind::Descent,
                edge,
            })
            .or_else(|| {
                self.ladder_at(cell).map(|edge| Transition {
                    kind: TransitionKind::Ascent,
                    edge,
                })
            });

        Landing { cell, transition }
    }
}
