//! Turn state and read-only snapshots.
//!
//! ## TurnState
//!
//! Who is up, what was rolled, whether input is locked, and whether the game
//! has started or ended. Owned and mutated by the turn controller only.
//!
//! ## GameSnapshot
//!
//! Immutable view handed to the presentation layer. Turn history uses an `im`
//! persistent vector so taking a snapshot is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::board::CellId;
use crate::dice::{DiceStage, DieFace};
use crate::rules::{GameResult, RollOutcome};

/// Lifecycle phase of the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a roll request.
    #[default]
    Idle,
    /// Dice spinning.
    Rolling,
    /// Applying the settled face.
    Resolving,
    /// Sliding down a snake or climbing a ladder.
    Animating,
    /// Input locked while the move settles, before the turn passes.
    Rotating,
    /// Someone reached cell 100. Terminal until restart.
    Ended,
}

/// Per-session turn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub current_player: PlayerId,
    /// Last settled face; `None` before the first roll.
    pub rolled_value: Option<DieFace>,
    pub phase: TurnPhase,
    pub game_started: bool,
    pub game_ended: bool,
    /// Turn number (starts at 1), incremented each time a roll settles.
    pub turn_number: u32,
}

impl TurnState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            ..Self::default()
        }
    }

    /// Advance the active player, wrapping at `player_count`.
    pub fn rotate_player(&mut self, player_count: usize) -> PlayerId {
        self.current_player = self.current_player.next(player_count);
        self.current_player
    }

    /// Clear game progress. The active player is kept.
    pub fn reset(&mut self) {
        *self = Self {
            current_player: self.current_player,
            ..Self::new()
        };
    }
}

/// One resolved roll in the turn history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player: PlayerId,
    pub face: DieFace,
    pub outcome: RollOutcome,
}

/// A player as seen by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub step: u8,
    pub started: bool,
    /// Cell to draw the token on; `None` while in base.
    pub cell: Option<CellId>,
}

impl PlayerView {
    #[must_use]
    pub fn new(id: PlayerId, player: Player) -> Self {
        Self {
            id,
            step: player.step,
            started: player.started,
            cell: player.cell(),
        }
    }
}

/// Read-only view of the whole session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerView>,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    /// Face on the die right now (flickering while spinning).
    pub dice_face: DieFace,
    pub dice_stage: DiceStage,
    pub rolled_value: Option<DieFace>,
    /// True while the animation lock is held; roll input should be disabled.
    pub input_locked: bool,
    /// Start cell of the snake being slid down, for highlighting.
    pub active_snake: Option<CellId>,
    pub game_started: bool,
    pub game_ended: bool,
    pub result: Option<GameResult>,
    pub history: Vector<TurnRecord>,
}

impl GameSnapshot {
    /// Whether the dice is spinning or showing a fresh result.
    #[must_use]
    pub fn dice_presenting(&self) -> bool {
        self.dice_stage != DiceStage::Idle
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_state_new() {
        let state = TurnState::new();

        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.phase, TurnPhase::Idle);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.rolled_value, None);
        assert!(!state.game_started);
        assert!(!state.game_ended);
    }

    #[test]
    fn test_rotate_player_wraps() {
        let mut state = TurnState::new();

        assert_eq!(state.rotate_player(3), PlayerId::new(1));
        assert_eq!(state.rotate_player(3), PlayerId::new(2));
        assert_eq!(state.rotate_player(3), PlayerId::new(0));
    }

    #[test]
    fn test_reset_keeps_current_player() {
        let mut state = TurnState::new();
        state.rotate_player(4);
        state.rolled_value = DieFace::new(3);
        state.game_started = true;
        state.game_ended = true;
        state.phase = TurnPhase::Ended;
        state.turn_number = 12;

        state.reset();

        assert_eq!(state.current_player, PlayerId::new(1));
        assert_eq!(state.rolled_value, None);
        assert_eq!(state.phase, TurnPhase::Idle);
        assert_eq!(state.turn_number, 1);
        assert!(!state.game_started);
        assert!(!state.game_ended);
    }

    #[test]
    fn test_player_view() {
        let view = PlayerView::new(PlayerId::new(2), Player { step: 0, started: true });
        assert_eq!(view.cell, CellId::new(1));

        let base = PlayerView::new(PlayerId::new(0), Player::default());
        assert_eq!(base.cell, None);
    }
}
