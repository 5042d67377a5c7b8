//! A controller paired with a clock.

use crate::core::{Clock, ConfigError, GameConfig, GameRng, GameSnapshot, SystemClock};
use crate::dice::FaceSource;

use super::controller::TurnController;

/// Drives a [`TurnController`] from a [`Clock`].
///
/// The presentation layer calls [`pump`](Self::pump) from its frame or timer
/// callback; every input first catches the controller up to the clock.
pub struct GameSession<C = SystemClock, S = GameRng> {
    controller: TurnController<S>,
    clock: C,
}

impl GameSession<SystemClock, GameRng> {
    /// Session on the wall clock with the configured seed.
    pub fn start(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(TurnController::new(config)?, SystemClock::new()))
    }
}

impl<C: Clock, S: FaceSource> GameSession<C, S> {
    /// Wrap a controller. Its virtual time should start where `clock` is.
    pub fn new(controller: TurnController<S>, clock: C) -> Self {
        Self { controller, clock }
    }

    /// Fire everything due up to the clock's current time.
    pub fn pump(&mut self) {
        let now = self.clock.now();
        self.controller.advance_to(now);
    }

    /// Catch up, then request a roll. Returns whether it was accepted.
    pub fn roll(&mut self) -> bool {
        self.pump();
        self.controller.request_roll()
    }

    /// Catch up, then restart.
    pub fn restart(&mut self) {
        self.pump();
        self.controller.request_restart();
    }

    /// Catch up, then snapshot.
    pub fn snapshot(&mut self) -> GameSnapshot {
        self.pump();
        self.controller.snapshot()
    }

    #[must_use]
    pub fn controller(&self) -> &TurnController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TurnController<S> {
        &mut self.controller
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
