//! Roll resolution rules.
//!
//! - A player in base enters only on a 1; any other face leaves them there.
//! - A roll passing cell 100 is forfeited.
//! - Landing exactly on 100 wins.
//! - Otherwise the player lands on `step + face`, then takes any snake or
//!   ladder starting there.
//! - A 6 or a 1 keeps the turn with the same player, except when entering
//!   from base.

pub mod engine;

pub use engine::{resolve_roll, GameResult, RollOutcome, ENTRY_FACE};
