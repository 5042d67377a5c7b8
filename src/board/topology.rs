//! Static board layout: cell numbering, ladders and snakes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Number of cells per row and rows per board.
pub const BOARD_SIDE: u8 = 10;

/// The winning cell.
pub const FINAL_CELL: u8 = BOARD_SIDE * BOARD_SIDE;

/// A cell on the board, numbered 1..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(u8);

impl CellId {
    /// Create a cell ID, or `None` if `n` is outside 1..=100.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= FINAL_CELL {
            Some(Self(n))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based (row, column) of this cell, row 0 holding cells 1..=10.
    #[must_use]
    pub const fn grid_position(self) -> (u8, u8) {
        ((self.0 - 1) / BOARD_SIDE, (self.0 - 1) % BOARD_SIDE)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed shortcut triggered by landing on `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: CellId,
    pub end: CellId,
}

pub type LadderEdge = Edge;
pub type SnakeEdge = Edge;

const LADDERS: [(u8, u8); 8] = [
    (1, 38),
    (4, 14),
    (8, 30),
    (21, 42),
    (28, 76),
    (50, 67),
    (71, 92),
    (80, 99),
];

const SNAKES: [(u8, u8); 7] = [
    (32, 10),
    (36, 6),
    (48, 26),
    (62, 18),
    (88, 24),
    (95, 56),
    (97, 78),
];

/// The fixed 10x10 board.
///
/// Lookups by start cell are O(1). The layout never changes after
/// construction and no two edges share a start cell.
#[derive(Clone, Debug)]
pub struct Board {
    ladders: Vec<LadderEdge>,
    snakes: Vec<SnakeEdge>,
    ladder_by_start: FxHashMap<CellId, LadderEdge>,
    snake_by_start: FxHashMap<CellId, SnakeEdge>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// The standard layout: 8 ladders and 7 snakes.
    #[must_use]
    pub fn standard() -> Self {
        let ladders: Vec<Edge> = LADDERS.iter().filter_map(|&(s, e)| edge(s, e)).collect();
        let snakes: Vec<Edge> = SNAKES.iter().filter_map(|&(s, e)| edge(s, e)).collect();

        let ladder_by_start = ladders.iter().map(|l| (l.start, *l)).collect();
        let snake_by_start = snakes.iter().map(|s| (s.start, *s)).collect();

        Self {
            ladders,
            snakes,
            ladder_by_start,
            snake_by_start,
        }
    }

    /// Ladder starting at `cell`, if any.
    #[must_use]
    pub fn ladder_at(&self, cell: CellId) -> Option<LadderEdge> {
        self.ladder_by_start.get(&cell).copied()
    }

    /// Snake whose head is at `cell`, if any.
    #[must_use]
    pub fn snake_at(&self, cell: CellId) -> Option<SnakeEdge> {
        self.snake_by_start.get(&cell).copied()
    }

    #[must_use]
    pub fn ladders(&self) -> &[LadderEdge] {
        &self.ladders
    }

    #[must_use]
    pub fn snakes(&self) -> &[SnakeEdge] {
        &self.snakes
    }

    /// All cells, 1..=100.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        (1..=FINAL_CELL).map(CellId)
    }

    /// Cells grouped into rows for grid rendering; row `r` holds
    /// `r*10+1 ..= r*10+10`.
    #[must_use]
    pub fn rows(&self) -> Vec<[CellId; BOARD_SIDE as usize]> {
        (0..BOARD_SIDE)
            .map(|row| std::array::from_fn(|col| CellId(row * BOARD_SIDE + col as u8 + 1)))
            .collect()
    }
}

fn edge(start: u8, end: u8) -> Option<Edge> {
    Some(Edge {
        start: CellId::new(start)?,
        end: CellId::new(end)?,
    })
}
