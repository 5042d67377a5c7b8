//! Turn orchestration: roll, resolve, move, rotate.
//!
//! [`TurnController`] is the single owner of the player table and turn state.
//! It accepts two inputs, a roll request and a restart request, and is moved
//! through time explicitly with `advance`. [`GameSession`] ties it to a clock.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use snakes_ladders::core::{GameConfig, PlayerId, TurnPhase};
//! use snakes_ladders::turn::TurnController;
//!
//! let mut game = TurnController::new(GameConfig::new(2)).unwrap();
//!
//! assert!(game.request_roll());
//! assert!(!game.request_roll()); // already rolling
//!
//! game.advance(Duration::from_millis(2000));
//! assert!(game.rolled_value().is_some());
//!
//! game.run_until_idle();
//! assert_eq!(game.phase(), TurnPhase::Idle);
//! ```

mod controller;
mod session;

pub use controller::{TurnController, TurnControllerBuilder};
pub use session::GameSession;
