//! Step-by-step movement with an exclusive animation lock.
//!
//! A movement walks a player's step one cell at a time toward a target. It
//! is an explicit state object: each call to [`MovementAnimator::step`]
//! advances exactly one cell, and the owner decides when the next step is
//! due. Only one movement may hold the [`AnimationLock`] at a time; a second
//! request while it is held is refused rather than queued.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::CellId;
use crate::core::{PlayerId, PlayerRegistry};

/// Mutual-exclusion flag for anything that must not overlap a movement or the
/// post-roll pause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationLock {
    held: bool,
}

impl AnimationLock {
    /// Take the lock. Returns false if it is already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Counting up: ordinary moves and ladders.
    Ascending,
    /// Counting down: snakes.
    Descending,
}

/// One movement in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Movement {
    pub player: PlayerId,
    pub from: CellId,
    pub to: CellId,
    pub direction: Direction,
    cursor: u8,
}

/// Result of advancing a movement by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// No movement in flight.
    Idle,
    /// Moved one cell; more to go.
    Moved(CellId),
    /// Reached the target. The lock has been released.
    Arrived(Movement),
}

/// Drives at most one [`Movement`] at a time.
#[derive(Clone, Debug, Default)]
pub struct MovementAnimator {
    current: Option<Movement>,
    highlight: Option<CellId>,
}

impl MovementAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start moving `player` from `from` toward `to`.
    ///
    /// Fails fast, returning false, if `lock` is already held. While the
    /// movement runs, a descent exposes its start cell as the active snake.
    pub fn start(
        &mut self,
        lock: &mut AnimationLock,
        player: PlayerId,
        from: CellId,
        to: CellId,
        direction: Direction,
    ) -> bool {
        if !lock.try_acquire() {
            warn!(%player, %from, %to, "movement requested while animation lock is held");
            return false;
        }

        self.highlight = match direction {
            Direction::Descending => Some(from),
            Direction::Ascending => None,
        };
        self.current = Some(Movement {
            player,
            from,
            to,
            direction,
            cursor: from.get(),
        });
        true
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Movement> {
        self.current.as_ref()
    }

    /// Start cell of the snake currently being slid down, if any.
    #[must_use]
    pub fn active_snake(&self) -> Option<CellId> {
        self.highlight
    }

    /// Advance the movement by one cell, writing the new step to `players`.
    pub fn step(&mut self, lock: &mut AnimationLock, players: &mut PlayerRegistry) -> StepOutcome {
        let Some(mut movement) = self.current else {
            return StepOutcome::Idle;
        };

        let target = movement.to.get();
        if movement.cursor != target {
            movement.cursor = match movement.direction {
                Direction::Ascending => movement.cursor + 1,
                Direction::Descending => movement.cursor - 1,
            };
            players.set_step(movement.player, movement.cursor);
            debug!(player = %movement.player, step = movement.cursor, "movement step");
        }

        let reached = match movement.direction {
            Direction::Ascending => movement.cursor >= target,
            Direction::Descending => movement.cursor <= target,
        };

        if reached {
            self.finish(lock);
            StepOutcome::Arrived(movement)
        } else {
            self.current = Some(movement);
            CellId::new(movement.cursor).map_or(StepOutcome::Idle, StepOutcome::Moved)
        }
    }

    /// Drop any movement in flight and release the lock.
    pub fn cancel(&mut self, lock: &mut AnimationLock) {
        if self.current.is_some() {
            self.finish(lock);
        }
    }

    fn finish(&mut self, lock: &mut AnimationLock) {
        self.current = None;
        self.highlight = None;
        lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(n: u8) -> CellId {
        CellId::new(n).unwrap()
    }

    fn run_to_end(
        animator: &mut MovementAnimator,
        lock: &mut AnimationLock,
        players: &mut PlayerRegistry,
    ) -> Vec<u8> {
        let mut trail = Vec::new();
        loop {
            match animator.step(lock, players) {
                StepOutcome::Moved(c) => trail.push(c.get()),
                StepOutcome::Arrived(m) => {
                    trail.push(players.get(m.player).step);
                    return trail;
                }
                StepOutcome::Idle => return trail,
            }
        }
    }

    #[test]
    fn test_lock_is_exclusive() {
        let mut lock = AnimationLock::default();
        assert!(lock.try_acquire());
        assert!(!lock.try_acquire());
        lock.release();
        assert!(lock.try_acquire());
    }

    #[test]
    fn test_snake_descends_one_cell_at_a_time() {
        let p0 = PlayerId::new(0);
        let mut players = PlayerRegistry::new(2);
        players.place(p0, 32, true);
        let mut lock = AnimationLock::default();
        let mut animator = MovementAnimator::new();

        assert!(animator.start(&mut lock, p0, cell(32), cell(28), Direction::Descending));
        assert!(lock.is_held());
        assert_eq!(animator.active_snake(), Some(cell(32)));

        let trail = run_to_end(&mut animator, &mut lock, &mut players);

        assert_eq!(trail, vec![31, 30, 29, 28]);
        assert_eq!(players.get(p0).step, 28);
        assert!(!lock.is_held());
        assert_eq!(animator.active_snake(), None);
        assert!(!animator.is_moving());
    }

    #[test]
    fn test_ladder_ascends_without_highlight() {
        let p1 = PlayerId::new(1);
        let mut players = PlayerRegistry::new(2);
        players.place(p1, 4, true);
        let mut lock = AnimationLock::default();
        let mut animator = MovementAnimator::new();

        assert!(animator.start(&mut lock, p1, cell(4), cell(14), Direction::Ascending));
        assert_eq!(animator.active_snake(), None);

        let trail = run_to_end(&mut animator, &mut lock, &mut players);

        assert_eq!(trail.len(), 10);
        assert_eq!(trail.first(), Some(&5));
        assert_eq!(players.get(p1).step, 14);
        assert!(!lock.is_held());
    }

    #[test]
    fn test_start_fails_fast_when_locked() {
        let p0 = PlayerId::new(0);
        let mut lock = AnimationLock::default();
        let mut animator = MovementAnimator::new();
        assert!(lock.try_acquire());

        assert!(!animator.start(&mut lock, p0, cell(32), cell(10), Direction::Descending));
        assert!(!animator.is_moving());
        assert_eq!(animator.active_snake(), None);
        assert!(lock.is_held());
    }

    #[test]
    fn test_step_when_idle() {
        let mut players = PlayerRegistry::new(2);
        let mut lock = AnimationLock::default();
        let mut animator = MovementAnimator::new();

        assert_eq!(animator.step(&mut lock, &mut players), StepOutcome::Idle);
        assert_eq!(players, PlayerRegistry::new(2));
    }

    #[test]
    fn test_cancel_releases_lock() {
        let p0 = PlayerId::new(0);
        let mut players = PlayerRegistry::new(2);
        players.place(p0, 95, true);
        let mut lock = AnimationLock::default();
        let mut animator = MovementAnimator::new();

        animator.start(&mut lock, p0, cell(95), cell(56), Direction::Descending);
        animator.step(&mut lock, &mut players);
        animator.cancel(&mut lock);

        assert!(!lock.is_held());
        assert!(!animator.is_moving());
        assert_eq!(animator.active_snake(), None);
        assert_eq!(players.get(p0).step, 94);
    }
}
