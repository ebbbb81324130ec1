//! The tile pool: all 60 tiles in a match, with played/unplayed tracking.
//!
//! Tiles are drawn uniformly at random from the unplayed set and may be
//! returned on a discard. The pool keeps a per-tile status plus derived
//! played/unplayed id lists, recomputed after every mutation; the invariant
//! `num_played() + num_unplayed() == POOL_SIZE` holds at all times.

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileId, NUM_TILE_EXITS};
use crate::core::{GameError, GameRng};

/// Number of tiles in a pool.
pub const POOL_SIZE: usize = 60;

/// The fixed connectivity patterns for the 60 tiles.
///
/// Each row is 8 exit slots plus the decorative strip offset. 24 distinct
/// patterns appear, duplicated two to four times each.
const TILE_PATTERNS: [[u8; NUM_TILE_EXITS + 1]; POOL_SIZE] = [
    [1, 0, 3, 2, 5, 4, 7, 6, 1],
    [1, 0, 3, 2, 5, 4, 7, 6, 1],
    [5, 4, 7, 6, 1, 0, 3, 2, 2],
    [5, 4, 7, 6, 1, 0, 3, 2, 2],
    [5, 4, 7, 6, 1, 0, 3, 2, 2],
    [5, 4, 7, 6, 1, 0, 3, 2, 2],
    [1, 0, 7, 6, 5, 4, 3, 2, 3],
    [1, 0, 7, 6, 5, 4, 3, 2, 3],
    [7, 2, 1, 4, 3, 6, 5, 0, 4],
    [7, 2, 1, 4, 3, 6, 5, 0, 4],
    [7, 2, 1, 6, 5, 4, 3, 0, 5],
    [7, 2, 1, 6, 5, 4, 3, 0, 5],
    [7, 4, 3, 2, 1, 6, 5, 0, 6],
    [7, 4, 3, 2, 1, 6, 5, 0, 6],
    [5, 4, 3, 2, 1, 0, 7, 6, 7],
    [5, 4, 3, 2, 1, 0, 7, 6, 7],
    [5, 2, 1, 4, 3, 0, 7, 6, 8],
    [5, 2, 1, 4, 3, 0, 7, 6, 8],
    [1, 0, 7, 4, 3, 6, 5, 2, 9],
    [1, 0, 7, 4, 3, 6, 5, 2, 9],
    [7, 6, 5, 4, 3, 2, 1, 0, 10],
    [7, 6, 5, 4, 3, 2, 1, 0, 10],
    [7, 6, 5, 4, 3, 2, 1, 0, 10],
    [3, 2, 1, 0, 5, 4, 7, 6, 11],
    [3, 2, 1, 0, 5, 4, 7, 6, 11],
    [1, 0, 5, 4, 3, 2, 7, 6, 12],
    [1, 0, 5, 4, 3, 2, 7, 6, 12],
    [7, 6, 3, 2, 5, 4, 1, 0, 13],
    [7, 6, 3, 2, 5, 4, 1, 0, 13],
    [1, 0, 3, 2, 7, 6, 5, 4, 14],
    [1, 0, 3, 2, 7, 6, 5, 4, 14],
    [3, 6, 5, 0, 7, 2, 1, 4, 15],
    [3, 6, 5, 0, 7, 2, 1, 4, 15],
    [3, 6, 7, 0, 5, 4, 1, 2, 16],
    [3, 6, 7, 0, 5, 4, 1, 2, 16],
    [1, 0, 5, 6, 7, 2, 3, 4, 17],
    [1, 0, 5, 6, 7, 2, 3, 4, 17],
    [5, 2, 1, 6, 7, 0, 3, 4, 18],
    [5, 2, 1, 6, 7, 0, 3, 4, 18],
    [5, 2, 1, 6, 7, 0, 3, 4, 18],
    [5, 2, 1, 6, 7, 0, 3, 4, 18],
    [3, 4, 7, 0, 1, 6, 5, 2, 19],
    [3, 4, 7, 0, 1, 6, 5, 2, 19],
    [3, 4, 7, 0, 1, 6, 5, 2, 19],
    [3, 4, 7, 0, 1, 6, 5, 2, 19],
    [7, 4, 5, 6, 1, 2, 3, 0, 20],
    [7, 4, 5, 6, 1, 2, 3, 0, 20],
    [7, 4, 5, 6, 1, 2, 3, 0, 20],
    [7, 4, 5, 6, 1, 2, 3, 0, 20],
    [3, 4, 5, 0, 1, 2, 7, 6, 21],
    [3, 4, 5, 0, 1, 2, 7, 6, 21],
    [5, 6, 7, 4, 3, 0, 1, 2, 22],
    [5, 6, 7, 4, 3, 0, 1, 2, 22],
    [5, 6, 7, 4, 3, 0, 1, 2, 22],
    [5, 6, 7, 4, 3, 0, 1, 2, 22],
    [3, 2, 1, 0, 7, 6, 5, 4, 23],
    [3, 2, 1, 0, 7, 6, 5, 4, 23],
    [3, 2, 1, 0, 7, 6, 5, 4, 23],
    [5, 6, 3, 2, 7, 0, 1, 4, 24],
    [5, 6, 3, 2, 7, 0, 1, 4, 24],
];

/// Whether a tile is on the board (or in a hand) or still in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum TileStatus {
    Played,
    Unplayed,
}

/// Inventory of all tiles in a match.
///
/// Created once per game; cloned (deeply, via the derived `Clone`) whenever
/// the AI needs a sandbox; mutated only through draw/return.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePool {
    tiles: Vec<Tile>,
    status: Vec<TileStatus>,
    played: Vec<TileId>,
    unplayed: Vec<TileId>,
}

impl TilePool {
    /// Build the full 60-tile pool, everything unplayed.
    #[must_use]
    pub fn new() -> Self {
        let tiles = TILE_PATTERNS
            .iter()
            .map(|row| {
                let mut exits = [0u8; NUM_TILE_EXITS];
                exits.copy_from_slice(&row[..NUM_TILE_EXITS]);
                Tile::new(exits, row[NUM_TILE_EXITS])
            })
            .collect();

        let mut pool = Self {
            tiles,
            status: vec![TileStatus::Unplayed; POOL_SIZE],
            played: Vec::new(),
            unplayed: Vec::new(),
        };
        pool.recompute_indices();
        pool
    }

    /// Get a tile by id.
    ///
    /// Fails with [`GameError::NotFound`] for an id outside the pool.
    pub fn tile(&self, id: TileId) -> Result<&Tile, GameError> {
        self.tiles.get(id.index()).ok_or(GameError::NotFound(id))
    }

    /// Draw one uniformly random unplayed tile and mark it played.
    ///
    /// Fails with [`GameError::PoolExhausted`] when nothing remains.
    pub fn draw_random_tile(&mut self, rng: &mut GameRng) -> Result<TileId, GameError> {
        let id = *rng
            .choose(&self.unplayed)
            .ok_or(GameError::PoolExhausted)?;

        self.status[id.index()] = TileStatus::Played;
        self.recompute_indices();
        Ok(id)
    }

    /// Return a played tile to the pool (a discard).
    ///
    /// Fails with [`GameError::InvalidState`] if the tile is already
    /// unplayed or nothing is currently played.
    pub fn return_tile_to_pool(&mut self, id: TileId) -> Result<(), GameError> {
        if id.index() >= POOL_SIZE {
            return Err(GameError::NotFound(id));
        }
        if self.played.is_empty() || self.status[id.index()] == TileStatus::Unplayed {
            return Err(GameError::InvalidState(id));
        }

        self.status[id.index()] = TileStatus::Unplayed;
        self.recompute_indices();
        Ok(())
    }

    /// Number of tiles currently played (on the board or in hands).
    #[must_use]
    pub fn num_played(&self) -> usize {
        self.played.len()
    }

    /// Number of tiles still drawable.
    #[must_use]
    pub fn num_unplayed(&self) -> usize {
        self.unplayed.len()
    }

    /// Whether no tiles remain to draw.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.unplayed.is_empty()
    }

    /// Rebuild the played/unplayed id lists from the status array.
    fn recompute_indices(&mut self) {
        self.played.clear();
        self.unplayed.clear();
        for (i, status) in self.status.iter().enumerate() {
            let id = TileId::new(i as u8);
            match status {
                TileStatus::Played => self.played.push(id),
                TileStatus::Unplayed => self.unplayed.push(id),
            }
        }
    }
}

impl Default for TilePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_all_unplayed() {
        let pool = TilePool::new();

        assert_eq!(pool.num_unplayed(), POOL_SIZE);
        assert_eq!(pool.num_played(), 0);
        assert!(!pool.is_exhausted());
    }

    #[test]
    fn test_every_pattern_is_an_involution() {
        let pool = TilePool::new();

        for i in 0..POOL_SIZE as u8 {
            let tile = pool.tile(TileId::new(i)).unwrap();
            for slot in 0..NUM_TILE_EXITS as u8 {
                let exit = tile.exit_for(slot).unwrap();
                assert_ne!(exit, slot);
                assert_eq!(tile.exit_for(exit), Ok(slot));
            }
        }
    }

    #[test]
    fn test_tile_out_of_range() {
        let pool = TilePool::new();
        assert_eq!(
            pool.tile(TileId::new(60)).unwrap_err(),
            GameError::NotFound(TileId::new(60))
        );
    }

    #[test]
    fn test_draw_marks_played() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(42);

        let id = pool.draw_random_tile(&mut rng).unwrap();

        assert_eq!(pool.num_played(), 1);
        assert_eq!(pool.num_unplayed(), POOL_SIZE - 1);
        // The drawn id is no longer drawable.
        for _ in 0..POOL_SIZE - 1 {
            let next = pool.draw_random_tile(&mut rng).unwrap();
            assert_ne!(next, id);
        }
    }

    #[test]
    fn test_draw_exhausted() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(42);

        for _ in 0..POOL_SIZE {
            pool.draw_random_tile(&mut rng).unwrap();
        }

        assert!(pool.is_exhausted());
        assert_eq!(
            pool.draw_random_tile(&mut rng).unwrap_err(),
            GameError::PoolExhausted
        );
    }

    #[test]
    fn test_return_tile_round_trip() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(42);

        let id = pool.draw_random_tile(&mut rng).unwrap();
        pool.return_tile_to_pool(id).unwrap();

        assert_eq!(pool.num_played(), 0);
        assert_eq!(pool.num_unplayed(), POOL_SIZE);
    }

    #[test]
    fn test_return_unplayed_tile_rejected() {
        let mut pool = TilePool::new();

        assert_eq!(
            pool.return_tile_to_pool(TileId::new(0)).unwrap_err(),
            GameError::InvalidState(TileId::new(0))
        );
    }

    #[test]
    fn test_count_invariant() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(7);

        for _ in 0..30 {
            let id = pool.draw_random_tile(&mut rng).unwrap();
            assert_eq!(pool.num_played() + pool.num_unplayed(), POOL_SIZE);
            if id.0 % 3 == 0 {
                pool.return_tile_to_pool(id).unwrap();
                assert_eq!(pool.num_played() + pool.num_unplayed(), POOL_SIZE);
            }
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(42);
        pool.draw_random_tile(&mut rng).unwrap();

        let mut sandbox = pool.clone();
        sandbox.draw_random_tile(&mut rng).unwrap();

        assert_eq!(pool.num_played(), 1);
        assert_eq!(sandbox.num_played(), 2);
    }
}
