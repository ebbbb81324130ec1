//! Player identity and per-seat state.
//!
//! ## PlayerId
//!
//! Type-safe 0-based player identifier. The board's station ownership
//! tables and the train markers both resolve to `PlayerId`s.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access. The game always
//! allocates all [`MAX_PLAYERS`](crate::MAX_PLAYERS) seats; inactive seats
//! carry [`Control::Nobody`].
//!
//! ## Player
//!
//! The mutable per-seat record: who controls the seat, score, the one or
//! two held tiles, AI difficulty, and last-move bookkeeping.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::tiles::TileId;

/// Player identifier. Player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(seat_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
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

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Unoccupied seat.
    Nobody,
    /// Driven by an external (human) actor.
    Human,
    /// Driven by the heuristic computer player.
    Computer,
}

/// Computer player difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiLevel {
    Easy,
    Medium,
    Hard,
}

/// Which of the two hand slots a tile occupies.
///
/// A seat holds at most two tiles: the primary and the reserve. When the
/// primary is consumed while a reserve exists, the reserve is promoted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeldSlot {
    Primary,
    Reserve,
}

/// Mutable per-seat state.
///
/// Created at game setup, mutated each turn, never destroyed mid-match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Who drives this seat.
    pub control: Control,

    /// Accumulated score.
    pub score: u32,

    /// Primary held tile.
    pub primary_tile: Option<TileId>,

    /// Reserve held tile. Never occupied while the primary is empty.
    pub reserve_tile: Option<TileId>,

    /// Difficulty; only meaningful for computer-controlled seats.
    pub ai_level: AiLevel,

    /// Number of this seat's stations whose tracks have been scored.
    pub stations_complete: u32,

    /// Board cell of the seat's most recent placement, if any.
    pub last_move: Option<(usize, usize)>,
}

impl Player {
    /// Create a new seat record.
    ///
    /// A negative initial score is clamped to zero rather than rejected.
    #[must_use]
    pub fn new(control: Control, initial_score: i32, ai_level: AiLevel) -> Self {
        Self {
            control,
            score: initial_score.max(0) as u32,
            primary_tile: None,
            reserve_tile: None,
            ai_level,
            stations_complete: 0,
            last_move: None,
        }
    }

    /// An unoccupied seat.
    #[must_use]
    pub fn vacant(ai_level: AiLevel) -> Self {
        Self::new(Control::Nobody, 0, ai_level)
    }

    /// The tile held in `slot`, if any.
    #[must_use]
    pub fn held_tile(&self, slot: HeldSlot) -> Option<TileId> {
        match slot {
            HeldSlot::Primary => self.primary_tile,
            HeldSlot::Reserve => self.reserve_tile,
        }
    }

    /// Number of tiles currently held (0-2).
    #[must_use]
    pub fn held_count(&self) -> usize {
        usize::from(self.primary_tile.is_some()) + usize::from(self.reserve_tile.is_some())
    }

    /// Whether the seat holds at least one tile.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held_count() > 0
    }

    /// Accept a drawn tile into the first free slot.
    ///
    /// Returns the slot the tile landed in, or `None` if both slots are
    /// already occupied (the tile is not taken in that case).
    pub fn accept_tile(&mut self, id: TileId) -> Option<HeldSlot> {
        if self.primary_tile.is_none() {
            self.primary_tile = Some(id);
            Some(HeldSlot::Primary)
        } else if self.reserve_tile.is_none() {
            self.reserve_tile = Some(id);
            Some(HeldSlot::Reserve)
        } else {
            None
        }
    }

    /// Remove and return the tile in `slot`.
    ///
    /// Consuming the primary while a reserve exists promotes the reserve
    /// into the primary slot, preserving the never-reserve-without-primary
    /// invariant.
    pub fn remove_held(&mut self, slot: HeldSlot) -> Option<TileId> {
        match slot {
            HeldSlot::Primary => {
                let taken = self.primary_tile.take();
                if taken.is_some() {
                    self.primary_tile = self.reserve_tile.take();
                }
                taken
            }
            HeldSlot::Reserve => self.reserve_tile.take(),
        }
    }

    /// Reset the per-match fields, keeping control and difficulty.
    pub fn clear_for_new_match(&mut self) {
        self.score = 0;
        self.primary_tile = None;
        self.reserve_tile = None;
        self.stations_complete = 0;
        self.last_move = None;
    }
}
