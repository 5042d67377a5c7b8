//! Core engine types: players, state, events, RNG, configuration, timing.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, TimingConfig};
pub use error::ConfigError;
pub use event::GameEvent;
pub use player::{Occupancy, Player, PlayerId, PlayerMap, PlayerRegistry};
pub use rng::{GameRng, GameRngState, RngCheckpoint};
pub use state::{GameSnapshot, PlayerView, TurnPhase, TurnRecord, TurnState};
pub use timer::TimerQueue;
