//! Events emitted as a turn unfolds.
//!
//! The controller appends events as it mutates state; the presentation layer
//! drains them to drive sounds, toasts or logs.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::CellId;
use crate::dice::DieFace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RollStarted { player: PlayerId },
    RollSettled { player: PlayerId, face: DieFace },
    Entered { player: PlayerId },
    StayedInBase { player: PlayerId },
    RollForfeited { player: PlayerId, face: DieFace },
    Landed { player: PlayerId, cell: CellId },
    SnakeBite { player: PlayerId, from: CellId, to: CellId },
    LadderClimb { player: PlayerId, from: CellId, to: CellId },
    ExtraTurn { player: PlayerId },
    TurnPassed { from: PlayerId, to: PlayerId },
    GameWon { player: PlayerId },
    Restarted,
}

impl GameEvent {
    /// The player the event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match *self {
            GameEvent::RollStarted { player }
            | GameEvent::RollSettled { player, .. }
            | GameEvent::Entered { player }
            | GameEvent::StayedInBase { player }
            | GameEvent::RollForfeited { player, .. }
            | GameEvent::Landed { player, .. }
            | GameEvent::SnakeBite { player, .. }
            | GameEvent::LadderClimb { player, .. }
            | GameEvent::ExtraTurn { player }
            | GameEvent::GameWon { player } => Some(player),
            GameEvent::TurnPassed { from, .. } => Some(from),
            GameEvent::Restarted => None,
        }
    }
}
