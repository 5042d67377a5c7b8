//! Pure roll resolution.
//!
//! Given a player's position and a settled face, decide what the roll does.
//! No timing, no mutation: the turn controller applies the outcome.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellId, Landing, FINAL_CELL};
use crate::core::{Player, PlayerId};
use crate::dice::DieFace;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// What a single roll does to the rolling player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// Rolled the entry face from base: the player enters at the board start.
    Entered,
    /// Still in base; the roll was not the entry face.
    StayedInBase,
    /// The roll would pass the final cell and is forfeited.
    Overshot,
    /// Landed exactly on the final cell.
    Won,
    /// Moved to `landing`, possibly taking a snake or ladder from there.
    Advanced(Landing),
}

impl RollOutcome {
    /// Whether the turn passes to the next player after this outcome.
    ///
    /// Entering or staying in base always passes. Overshooting or advancing
    /// passes unless the face grants an extra turn. Winning ends the game.
    #[must_use]
    pub fn passes_turn(&self, face: DieFace) -> bool {
        match self {
            RollOutcome::Entered | RollOutcome::StayedInBase => true,
            RollOutcome::Overshot | RollOutcome::Advanced(_) => !face.grants_extra_turn(),
            RollOutcome::Won => false,
        }
    }
}

/// Face a player in base must roll to enter the board.
pub const ENTRY_FACE: u8 = 1;

/// Decide the outcome of `player` rolling `face` on `board`.
#[must_use]
pub fn resolve_roll(board: &Board, player: Player, face: DieFace) -> RollOutcome {
    if !player.started {
        return if face.get() == ENTRY_FACE {
            RollOutcome::Entered
        } else {
            RollOutcome::StayedInBase
        };
    }

    let target = u16::from(player.step) + u16::from(face.get());
    let final_cell = u16::from(FINAL_CELL);

    if target > final_cell {
        return RollOutcome::Overshot;
    }
    if target == final_cell {
        return RollOutcome::Won;
    }

    match CellId::new(target as u8) {
        Some(cell) => RollOutcome::Advanced(board.resolve(cell)),
        // step + face >= 1 and < 100, so the cell always exists
        None => RollOutcome::Overshot,
    }
}
