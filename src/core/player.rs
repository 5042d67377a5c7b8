//! Player identification and the per-player position registry.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 2-255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## PlayerRegistry
//!
//! The mutable `{step, started}` table. Only the turn controller and the
//! movement animator write to it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::board::{CellId, FINAL_CELL};

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player after this one, wrapping around `player_count`.
    ///
    /// ```
    /// use snakes_ladders::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        let next = self.index() + 1;
        if next >= player_count {
            Self(0)
        } else {
            Self(next as u8)
        }
    }

    /// Every seat at a table of `player_count`, in turn order.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use snakes_ladders::core::{PlayerId, PlayerMap};
///
/// let mut rolls: PlayerMap<u32> = PlayerMap::with_default(3);
/// rolls[PlayerId::new(1)] += 1;
/// assert_eq!(rolls[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from `factory`.
    ///
    /// Panics on an empty table or more than 255 seats; configuration is
    /// validated before any map is built.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Every seat starts at `T::default()`.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Position state of one player.
///
/// `step` counts cells advanced from the base area and is compared directly
/// against cell numbers. A started player at step 0 stands at the board
/// entrance, shown on cell 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub step: u8,
    pub started: bool,
}

impl Player {
    /// Cell the token should be drawn on, or `None` while still in base.
    #[must_use]
    pub fn cell(&self) -> Option<CellId> {
        if self.started {
            CellId::new(self.step.max(1))
        } else {
            None
        }
    }

    /// Whether this player has reached the final cell.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.step == FINAL_CELL
    }
}

/// Players standing on a single cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub players: SmallVec<[PlayerId; 4]>,
}

impl Occupancy {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// More than one token shares the cell.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.players.len() > 1
    }
}

/// Mutable position table for every player in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: PlayerMap<Player>,
}

impl PlayerRegistry {
    /// Create a registry with every player un-started at step 0.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            players: PlayerMap::with_default(player_count),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Player {
        self.players[player]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Mark a player as entered at the board entrance.
    pub fn enter(&mut self, player: PlayerId) {
        let p = &mut self.players[player];
        p.started = true;
        p.step = 0;
    }

    /// Set a player's step, clamped to the final cell.
    pub fn set_step(&mut self, player: PlayerId, step: u8) {
        self.players[player].step = step.min(FINAL_CELL);
    }

    /// Place a player directly. Used to set up positions for replays and tests.
    pub fn place(&mut self, player: PlayerId, step: u8, started: bool) {
        self.players[player] = Player {
            step: step.min(FINAL_CELL),
            started,
        };
    }

    /// Return every player to `{step: 0, started: false}`.
    pub fn reset(&mut self) {
        for (_, p) in self.players.iter_mut() {
            *p = Player::default();
        }
    }

    /// Players whose token is drawn on `cell`.
    #[must_use]
    pub fn occupants(&self, cell: CellId) -> Occupancy {
        let players = self
            .players
            .iter()
            .filter(|(_, p)| p.cell() == Some(cell))
            .map(|(id, _)| id)
            .collect();
        Occupancy { players }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 1");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_default(0);
    }

    #[test]
    fn test_registry_starts_in_base() {
        let registry = PlayerRegistry::new(3);

        for (_, p) in registry.iter() {
            assert_eq!(*p, Player { step: 0, started: false });
            assert_eq!(p.cell(), None);
        }
    }

    #[test]
    fn test_entered_player_shows_on_first_cell() {
        let mut registry = PlayerRegistry::new(2);
        registry.enter(PlayerId::new(0));

        let p = registry.get(PlayerId::new(0));
        assert!(p.started);
        assert_eq!(p.step, 0);
        assert_eq!(p.cell(), CellId::new(1));
    }

    #[test]
    fn test_set_step_clamps() {
        let mut registry = PlayerRegistry::new(2);
        registry.place(PlayerId::new(1), 98, true);
        registry.set_step(PlayerId::new(1), 120);

        assert_eq!(registry.get(PlayerId::new(1)).step, 100);
        assert!(registry.get(PlayerId::new(1)).has_finished());
    }

    #[test]
    fn test_occupants() {
        let mut registry = PlayerRegistry::new(3);
        registry.place(PlayerId::new(0), 12, true);
        registry.place(PlayerId::new(2), 12, true);
        registry.place(PlayerId::new(1), 40, true);

        let shared = registry.occupants(CellId::new(12).unwrap());
        assert!(shared.is_shared());
        assert_eq!(shared.players.as_slice(), &[PlayerId::new(0), PlayerId::new(2)]);

        let single = registry.occupants(CellId::new(40).unwrap());
        assert!(!single.is_shared());

        assert!(registry.occupants(CellId::new(77).unwrap()).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut registry = PlayerRegistry::new(2);
        registry.place(PlayerId::new(0), 55, true);
        registry.enter(PlayerId::new(1));

        registry.reset();

        assert_eq!(registry, PlayerRegistry::new(2));
    }
}
