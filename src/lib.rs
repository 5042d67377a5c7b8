//! # snakes-ladders
//!
//! Turn-based rules engine and animation sequencing for a multiplayer
//! Snakes and Ladders board.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: one [`TurnController`] owns the player table and turn
//!    state. The presentation layer sends intents (`request_roll`,
//!    `request_restart`) and reads immutable [`GameSnapshot`]s.
//!
//! 2. **Explicit time**: every delay (dice spin, movement steps, the post-move
//!    pause) is a timer on a virtual-time queue advanced by the caller, so a
//!    whole game can be replayed deterministically under a manual clock.
//!
//! 3. **Debounced input**: a roll while busy or after the game ended is
//!    ignored, not reported as an error.
//!
//! ## Modules
//!
//! - `core`: Players, turn state, snapshots, events, RNG, configuration, timers
//! - `board`: Cell numbering, snakes, ladders, transition resolution
//! - `dice`: Dice faces, face sources, the spinning roll presentation
//! - `animation`: Step-by-step movement under an exclusive lock
//! - `rules`: Pure roll resolution
//! - `turn`: The turn state machine and clock-driven session

pub mod animation;
pub mod board;
pub mod core;
pub mod dice;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, GameConfig, GameEvent, GameRng, GameSnapshot, ManualClock, Player,
    PlayerId, PlayerRegistry, PlayerView, RngCheckpoint, SystemClock, TimingConfig, TurnPhase,
    TurnRecord, TurnState,
};

pub use crate::board::{Board, CellId, Edge, Landing, Transition, TransitionKind};

pub use crate::dice::{DiceStage, DieFace, FaceSource, LoadedDie};

pub use crate::animation::{AnimationLock, Direction, MovementAnimator};

pub use crate::rules::{resolve_roll, GameResult, RollOutcome};

pub use crate::turn::{GameSession, TurnController, TurnControllerBuilder};
