//! The turn state machine.
//!
//! `Idle -> Rolling -> Resolving -> [Animating] -> Rotating -> Idle`, with
//! `Ended` as the terminal state once a player reaches cell 100.
//!
//! Every delay is a timer on a virtual-time queue. Nothing happens between
//! calls to [`TurnController::advance`]; the caller owns the clock.

use im::Vector;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::animation::{AnimationLock, Direction, MovementAnimator, StepOutcome};
use crate::board::{Board, CellId, TransitionKind, FINAL_CELL};
use crate::core::{
    ConfigError, GameConfig, GameEvent, GameRng, GameRngState, GameSnapshot, Occupancy, Player,
    PlayerId, PlayerRegistry, PlayerView, RngCheckpoint, TimerQueue, TurnPhase, TurnRecord,
    TurnState,
};
use crate::dice::{DiceRoller, DiceStage, DieFace, FaceSource};
use crate::rules::{resolve_roll, GameResult, RollOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnTimer {
    Flicker,
    Settle,
    PresentEnd,
    Step,
    Rotate { pass: bool },
}

/// Owns the player table and turn state; exposes only intent-level input.
pub struct TurnController<S = GameRng> {
    config: GameConfig,
    board: Board,
    players: PlayerRegistry,
    turn: TurnState,
    dice: DiceRoller<S>,
    lock: AnimationLock,
    animator: MovementAnimator,
    timers: TimerQueue<TurnTimer>,
    roll_deadline: Duration,
    pass_after_move: bool,
    result: Option<GameResult>,
    history: Vector<TurnRecord>,
    events: Vec<GameEvent>,
}

impl TurnController<GameRng> {
    /// Create a controller with the configured seed driving the dice.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        TurnControllerBuilder::new(config).build()
    }

    /// Capture both dice streams, to resume the same rolls later.
    ///
    /// Take it between turns; a checkpoint taken mid-spin resumes with the
    /// flicker stream part-way through that spin.
    #[must_use]
    pub fn rng_checkpoint(&self) -> RngCheckpoint {
        RngCheckpoint {
            dice: self.dice.source().state(),
            flicker: self.dice.flicker_rng().state(),
        }
    }
}

impl<S: FaceSource> TurnController<S> {
    // === Input ===

    /// Start a roll for the active player.
    ///
    /// Ignored, returning false, if the game has ended, the animation lock is
    /// held, or a roll is already in flight.
    pub fn request_roll(&mut self) -> bool {
        if self.turn.game_ended {
            debug!("roll ignored: game has ended");
            return false;
        }
        if self.lock.is_held() || self.turn.phase != TurnPhase::Idle || self.dice.is_busy() {
            debug!(phase = ?self.turn.phase, locked = self.lock.is_held(), "roll ignored: busy");
            return false;
        }
        if !self.dice.begin() {
            return false;
        }

        let player = self.turn.current_player;
        self.turn.game_started = true;
        self.turn.phase = TurnPhase::Rolling;
        self.roll_deadline = self.timers.now() + self.config.timing.roll_duration();
        self.timers
            .schedule(self.config.timing.flicker_interval(), TurnTimer::Flicker);
        self.timers
            .schedule(self.config.timing.roll_duration(), TurnTimer::Settle);
        self.events.push(GameEvent::RollStarted { player });
        debug!(%player, "roll started");
        true
    }

    /// Reset the game, cancelling anything in flight.
    ///
    /// Pending timers are dropped and the animation lock is released before
    /// players and turn state are reinitialized. The board is untouched and
    /// the active player is kept.
    pub fn request_restart(&mut self) {
        self.timers.clear();
        self.animator.cancel(&mut self.lock);
        self.lock.release();
        self.dice.reset();
        self.players.reset();
        self.turn.reset();
        self.pass_after_move = false;
        self.result = None;
        self.history = Vector::new();
        self.events.push(GameEvent::Restarted);
        info!(player_count = self.player_count(), "game restarted");
    }

    // === Time ===

    /// Advance virtual time by `dt`, firing every timer that falls due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timers.now() + dt;
        self.advance_to(until);
    }

    /// Advance virtual time to `until`, firing every timer that falls due.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some(timer) = self.timers.pop_due(until) {
            self.fire(timer);
        }
        self.timers.settle_at(until);
    }

    /// Fire timers until none remain, finishing the current turn.
    pub fn run_until_idle(&mut self) {
        while let Some(deadline) = self.timers.next_deadline() {
            self.advance_to(deadline);
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Deadline of the next scheduled mutation, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    fn fire(&mut self, timer: TurnTimer) {
        match timer {
            TurnTimer::Flicker => self.on_flicker(),
            TurnTimer::Settle => self.on_settle(),
            TurnTimer::PresentEnd => self.dice.finish_presenting(),
            TurnTimer::Step => self.on_step(),
            TurnTimer::Rotate { pass } => self.on_rotate(pass),
        }
    }

    fn on_flicker(&mut self) {
        self.dice.flicker();
        let interval = self.config.timing.flicker_interval();
        if self.dice.stage() == DiceStage::Spinning && self.timers.now() + interval < self.roll_deadline {
            self.timers.schedule(interval, TurnTimer::Flicker);
        }
    }

    fn on_settle(&mut self) {
        let Some(face) = self.dice.settle() else {
            return;
        };
        self.timers
            .schedule(self.config.timing.present_linger(), TurnTimer::PresentEnd);
        self.resolve(face);
    }

    fn on_step(&mut self) {
        match self.animator.step(&mut self.lock, &mut self.players) {
            StepOutcome::Moved(_) => {
                self.timers
                    .schedule(self.config.timing.step_interval(), TurnTimer::Step);
            }
            StepOutcome::Arrived(movement) => {
                debug!(player = %movement.player, cell = %movement.to, "movement finished");
                self.begin_rotation(self.pass_after_move);
            }
            StepOutcome::Idle => {}
        }
    }

    fn on_rotate(&mut self, pass: bool) {
        let from = self.turn.current_player;
        if pass {
            let to = self.turn.rotate_player(self.player_count());
            self.events.push(GameEvent::TurnPassed { from, to });
            debug!(%from, %to, "turn passed");
        } else {
            self.events.push(GameEvent::ExtraTurn { player: from });
            debug!(player = %from, "extra turn");
        }
        self.lock.release();
        self.turn.phase = TurnPhase::Idle;
    }

    // === Resolution ===

    fn resolve(&mut self, face: DieFace) {
        self.turn.phase = TurnPhase::Resolving;
        self.turn.rolled_value = Some(face);

        let player = self.turn.current_player;
        let outcome = resolve_roll(&self.board, self.players.get(player), face);

        self.history.push_back(TurnRecord {
            turn: self.turn.turn_number,
            player,
            face,
            outcome,
        });
        self.turn.turn_number += 1;
        self.events.push(GameEvent::RollSettled { player, face });
        info!(%player, %face, ?outcome, "roll settled");

        let pass = outcome.passes_turn(face);
        match outcome {
            RollOutcome::Entered => {
                self.players.enter(player);
                self.events.push(GameEvent::Entered { player });
                self.begin_rotation(pass);
            }
            RollOutcome::StayedInBase => {
                self.events.push(GameEvent::StayedInBase { player });
                self.begin_rotation(pass);
            }
            RollOutcome::Overshot => {
                self.events.push(GameEvent::RollForfeited { player, face });
                self.begin_rotation(pass);
            }
            RollOutcome::Won => {
                self.players.set_step(player, FINAL_CELL);
                self.turn.game_ended = true;
                self.turn.phase = TurnPhase::Ended;
                self.result = Some(GameResult::Winner(player));
                self.events.push(GameEvent::GameWon { player });
                info!(%player, "game won");
            }
            RollOutcome::Advanced(landing) => {
                self.players.set_step(player, landing.cell.get());
                self.events.push(GameEvent::Landed {
                    player,
                    cell: landing.cell,
                });

                match landing.transition {
                    Some(transition) => {
                        let edge = transition.edge;
                        let direction = match transition.kind {
                            TransitionKind::Descent => {
                                info!(%player, from = %edge.start, to = %edge.end, "snake");
                                self.events.push(GameEvent::SnakeBite {
                                    player,
                                    from: edge.start,
                                    to: edge.end,
                                });
                                Direction::Descending
                            }
                            TransitionKind::Ascent => {
                                info!(%player, from = %edge.start, to = %edge.end, "ladder");
                                self.events.push(GameEvent::LadderClimb {
                                    player,
                                    from: edge.start,
                                    to: edge.end,
                                });
                                Direction::Ascending
                            }
                        };
                        self.begin_movement(player, edge.start, edge.end, direction, pass);
                    }
                    None => self.begin_rotation(pass),
                }
            }
        }
    }

    fn begin_movement(
        &mut self,
        player: PlayerId,
        from: CellId,
        to: CellId,
        direction: Direction,
        pass: bool,
    ) {
        if self
            .animator
            .start(&mut self.lock, player, from, to, direction)
        {
            self.turn.phase = TurnPhase::Animating;
            self.pass_after_move = pass;
            self.timers
                .schedule(self.config.timing.step_interval(), TurnTimer::Step);
        } else {
            // State still has to land where the rules say, even without the walk.
            warn!(%player, %to, "movement skipped; placing player directly");
            self.players.set_step(player, to.get());
            self.begin_rotation(pass);
        }
    }

    fn begin_rotation(&mut self, pass: bool) {
        if !self.lock.try_acquire() {
            warn!("animation lock already held entering rotation");
        }
        self.turn.phase = TurnPhase::Rotating;
        self.timers
            .schedule(self.config.timing.settle_delay(), TurnTimer::Rotate { pass });
    }

    // === Observation ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Player {
        self.players.get(id)
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    #[must_use]
    pub fn rolled_value(&self) -> Option<DieFace> {
        self.turn.rolled_value
    }

    /// Face on the die right now.
    #[must_use]
    pub fn dice_face(&self) -> DieFace {
        self.dice.shown()
    }

    /// The die is spinning or still showing a fresh result.
    #[must_use]
    pub fn dice_presenting(&self) -> bool {
        self.dice.is_busy()
    }

    /// Roll input should be disabled.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.lock.is_held()
    }

    #[must_use]
    pub fn active_snake(&self) -> Option<CellId> {
        self.animator.active_snake()
    }

    #[must_use]
    pub fn game_started(&self) -> bool {
        self.turn.game_started
    }

    #[must_use]
    pub fn game_ended(&self) -> bool {
        self.turn.game_ended
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Players drawn on `cell`.
    #[must_use]
    pub fn occupants(&self, cell: CellId) -> Occupancy {
        self.players.occupants(cell)
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Immutable view of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self
                .players
                .iter()
                .map(|(id, p)| PlayerView::new(id, *p))
                .collect(),
            current_player: self.turn.current_player,
            phase: self.turn.phase,
            dice_face: self.dice.shown(),
            dice_stage: self.dice.stage(),
            rolled_value: self.turn.rolled_value,
            input_locked: self.lock.is_held(),
            active_snake: self.animator.active_snake(),
            game_started: self.turn.game_started,
            game_ended: self.turn.game_ended,
            result: self.result,
            history: self.history.clone(),
        }
    }
}

/// Builder for a [`TurnController`].
///
/// ```
/// use snakes_ladders::core::{GameConfig, PlayerId};
/// use snakes_ladders::dice::LoadedDie;
/// use snakes_ladders::turn::TurnControllerBuilder;
///
/// let mut game = TurnControllerBuilder::new(GameConfig::new(2))
///     .face_source(LoadedDie::new([4], 0))
///     .place(PlayerId::new(0), 28, true)
///     .build()
///     .unwrap();
///
/// game.request_roll();
/// game.run_until_idle();
/// assert_eq!(game.player(PlayerId::new(0)).step, 10);
/// ```
pub struct TurnControllerBuilder<S = GameRng> {
    config: GameConfig,
    source: S,
    flicker: Option<GameRngState>,
    placements: Vec<(PlayerId, u8, bool)>,
    current_player: PlayerId,
}

impl TurnControllerBuilder<GameRng> {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let source = GameRng::new(config.seed).for_context("dice");
        Self {
            config,
            source,
            flicker: None,
            placements: Vec::new(),
            current_player: PlayerId::new(0),
        }
    }

    /// Continue both dice streams from a checkpoint instead of the seed.
    #[must_use]
    pub fn restore_rng(mut self, checkpoint: &RngCheckpoint) -> Self {
        self.source = GameRng::from_state(&checkpoint.dice);
        self.flicker = Some(checkpoint.flicker.clone());
        self
    }
}

impl<S: FaceSource> TurnControllerBuilder<S> {
    /// Use `source` for authoritative roll results instead of the seeded RNG.
    #[must_use]
    pub fn face_source<T: FaceSource>(self, source: T) -> TurnControllerBuilder<T> {
        TurnControllerBuilder {
            config: self.config,
            source,
            flicker: self.flicker,
            placements: self.placements,
            current_player: self.current_player,
        }
    }

    /// Start a player at a given position.
    #[must_use]
    pub fn place(mut self, player: PlayerId, step: u8, started: bool) -> Self {
        self.placements.push((player, step, started));
        self
    }

    /// Give the first turn to `player`.
    #[must_use]
    pub fn current_player(mut self, player: PlayerId) -> Self {
        self.current_player = player;
        self
    }

    pub fn build(self) -> Result<TurnController<S>, ConfigError> {
        self.config.validate()?;

        let player_count = self.config.player_count;
        let unknown = self
            .placements
            .iter()
            .map(|&(p, _, _)| p)
            .chain(std::iter::once(self.current_player))
            .find(|p| p.index() >= player_count);
        if let Some(player) = unknown {
            return Err(ConfigError::UnknownPlayer(player.0));
        }

        let mut players = PlayerRegistry::new(player_count);
        for (player, step, started) in self.placements {
            players.place(player, step, started);
        }

        let flicker = match &self.flicker {
            Some(state) => GameRng::from_state(state),
            None => GameRng::new(self.config.seed).for_context("flicker"),
        };
        let dice = DiceRoller::new(self.source, flicker);

        let mut turn = TurnState::new();
        turn.current_player = self.current_player;

        debug!(player_count, seed = self.config.seed, "turn controller created");

        Ok(TurnController {
            config: self.config,
            board: Board::standard(),
            players,
            turn,
            dice,
            lock: AnimationLock::default(),
            animator: MovementAnimator::new(),
            timers: TimerQueue::new(),
            roll_deadline: Duration::ZERO,
            pass_after_move: false,
            result: None,
            history: Vector::new(),
            events: Vec::new(),
        })
    }
}
