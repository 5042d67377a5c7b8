//! Dice resolution with a timed spinning presentation.
//!
//! A roll goes through three stages:
//!
//! 1. **Spinning**: the shown face flickers at a fixed interval. Flicker faces
//!    are cosmetic and come from their own RNG stream.
//! 2. **Presenting**: the authoritative face is drawn from a [`FaceSource`]
//!    and stays on display for a short linger.
//! 3. **Idle**: the last face remains visible, ready for the next roll.
//!
//! The roller only tracks stage and faces. Timing is driven by the turn
//! controller's timer queue.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::GameRng;

/// A face of a six-sided die, 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieFace(u8);

impl DieFace {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Rolling a 6 or a 1 earns the same player another roll.
    #[must_use]
    pub const fn grants_extra_turn(self) -> bool {
        self.0 == 6 || self.0 == 1
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of authoritative roll results.
pub trait FaceSource {
    fn next_face(&mut self) -> DieFace;
}

impl FaceSource for GameRng {
    fn next_face(&mut self) -> DieFace {
        DieFace(self.gen_range(DieFace::MIN..DieFace::MAX + 1))
    }
}

/// A die that replays a scripted sequence of faces, then falls back to an RNG.
///
/// ```
/// use snakes_ladders::dice::{FaceSource, LoadedDie};
///
/// let mut die = LoadedDie::new([6, 1], 0);
/// assert_eq!(die.next_face().get(), 6);
/// assert_eq!(die.next_face().get(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct LoadedDie {
    script: VecDeque<DieFace>,
    fallback: GameRng,
}

impl LoadedDie {
    /// Faces outside 1..=6 in `script` are dropped.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u8>, fallback_seed: u64) -> Self {
        Self {
            script: script.into_iter().filter_map(DieFace::new).collect(),
            fallback: GameRng::new(fallback_seed),
        }
    }

    /// Queue more faces after the current script.
    pub fn push(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.script.extend(faces.into_iter().filter_map(DieFace::new));
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FaceSource for LoadedDie {
    fn next_face(&mut self) -> DieFace {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.next_face())
    }
}

/// Presentation stage of the die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceStage {
    #[default]
    Idle,
    Spinning,
    Presenting,
}

/// Tracks the shown face and stage of the die across a roll.
#[derive(Clone, Debug)]
pub struct DiceRoller<S> {
    source: S,
    flicker: GameRng,
    stage: DiceStage,
    shown: DieFace,
}

impl<S: FaceSource> DiceRoller<S> {
    #[must_use]
    pub fn new(source: S, flicker: GameRng) -> Self {
        Self {
            source,
            flicker,
            stage: DiceStage::Idle,
            shown: DieFace(1),
        }
    }

    #[must_use]
    pub fn stage(&self) -> DiceStage {
        self.stage
    }

    /// Face currently on display: a flicker face while spinning, the result
    /// afterwards.
    #[must_use]
    pub fn shown(&self) -> DieFace {
        self.shown
    }

    /// Source of authoritative results.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Stream the cosmetic flicker faces come from.
    #[must_use]
    pub fn flicker_rng(&self) -> &GameRng {
        &self.flicker
    }

    /// Spinning or still presenting a fresh result.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.stage != DiceStage::Idle
    }

    /// Begin spinning. Returns false if a roll is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.stage = DiceStage::Spinning;
        true
    }

    /// Show a new cosmetic face. No effect unless spinning.
    pub fn flicker(&mut self) {
        if self.stage == DiceStage::Spinning {
            self.shown = self.flicker.next_face();
        }
    }

    /// Stop spinning and draw the authoritative face.
    pub fn settle(&mut self) -> Option<DieFace> {
        if self.stage != DiceStage::Spinning {
            return None;
        }
        let face = self.source.next_face();
        self.shown = face;
        self.stage = DiceStage::Presenting;
        Some(face)
    }

    /// End the post-settle linger.
    pub fn finish_presenting(&mut self) {
        if self.stage == DiceStage::Presenting {
            self.stage = DiceStage::Idle;
        }
    }

    /// Abort any roll in flight and show 1.
    pub fn reset(&mut self) {
        self.stage = DiceStage::Idle;
        self.shown = DieFace(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roller(script: impl IntoIterator<Item = u8>) -> DiceRoller<LoadedDie> {
        DiceRoller::new(LoadedDie::new(script, 0), GameRng::new(1))
    }

    #[test]
    fn test_die_face_bounds() {
        assert!(DieFace::new(0).is_none());
        assert!(DieFace::new(7).is_none());
        assert_eq!(DieFace::new(3).map(DieFace::get), Some(3));
    }

    #[test]
    fn test_extra_turn_faces() {
        let extra: Vec<u8> = (1..=6)
            .filter_map(DieFace::new)
            .filter(|f| f.grants_extra_turn())
            .map(DieFace::get)
            .collect();
        assert_eq!(extra, vec![1, 6]);
    }

    #[test]
    fn test_rng_faces_in_range() {
        let mut rng = GameRng::new(9);
        for _ in 0..500 {
            let face = rng.next_face().get();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_loaded_die_falls_back() {
        let mut die = LoadedDie::new([4, 9, 2], 5);
        assert_eq!(die.remaining(), 2);
        assert_eq!(die.next_face().get(), 4);
        assert_eq!(die.next_face().get(), 2);

        let face = die.next_face().get();
        assert!((1..=6).contains(&face));

        die.push([5]);
        assert_eq!(die.next_face().get(), 5);
    }

    #[test]
    fn test_roll_lifecycle() {
        let mut dice = roller([5]);
        assert_eq!(dice.stage(), DiceStage::Idle);

        assert!(dice.begin());
        assert_eq!(dice.stage(), DiceStage::Spinning);

        dice.flicker();
        assert!((1..=6).contains(&dice.shown().get()));

        assert_eq!(dice.settle().map(DieFace::get), Some(5));
        assert_eq!(dice.shown().get(), 5);
        assert_eq!(dice.stage(), DiceStage::Presenting);
        assert!(dice.is_busy());

        dice.finish_presenting();
        assert!(!dice.is_busy());
        assert_eq!(dice.shown().get(), 5);
    }

    #[test]
    fn test_concurrent_begin_rejected() {
        let mut dice = roller([3, 4]);
        assert!(dice.begin());
        assert!(!dice.begin());

        dice.settle();
        assert!(!dice.begin());
    }

    #[test]
    fn test_settle_requires_spinning() {
        let mut dice = roller([3]);
        assert_eq!(dice.settle(), None);
    }

    #[test]
    fn test_flicker_ignored_after_settle() {
        let mut dice = roller([2]);
        dice.begin();
        dice.settle();
        dice.flicker();
        assert_eq!(dice.shown().get(), 2);
    }

    #[test]
    fn test_reset() {
        let mut dice = roller([6]);
        dice.begin();
        dice.reset();
        assert_eq!(dice.stage(), DiceStage::Idle);
        assert_eq!(dice.shown().get(), 1);
        assert!(dice.begin());
    }
}
