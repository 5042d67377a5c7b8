//! Board topology and snake/ladder resolution.
//!
//! The board is a fixed 10x10 grid of cells numbered 1..=100, row 0 holding
//! cells 1..=10. Each snake or ladder is an [`Edge`] keyed by its start cell;
//! landing exactly on a start cell triggers it.
//!
//! ```
//! use snakes_ladders::board::{Board, CellId};
//!
//! let board = Board::standard();
//! let landing = board.resolve(CellId::new(32).unwrap());
//! assert_eq!(landing.destination().get(), 10);
//! ```

mod overlay;
mod topology;
mod transition;

pub use overlay::{CellLocator, EdgeAnchors};
pub use topology::{Board, CellId, Edge, LadderEdge, SnakeEdge, BOARD_SIDE, FINAL_CELL};
pub use transition::{Landing, Transition, TransitionKind};
