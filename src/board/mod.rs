//! Board topology, legality, traversal, and scoring.
//!
//! The board is a fixed 10x10 grid:
//!
//! - the 4 corners are unused;
//! - the 32 remaining border cells are stations, numbered clockwise from
//!   the top-left;
//! - the central 2x2 block holds the central stations;
//! - the remaining 60 interior cells are playable.
//!
//! The board owns its [`TilePool`]: traversal resolves placed tile ids
//! against the pool, and cloning a board for the AI sandbox deep-copies
//! the pool with it.
//!
//! ## Modules
//!
//! - `square`: cell and track-status types
//! - `stations`: station geometry and ownership tables
//! - `legality`: the legal-move bitmap and place/remove
//! - `traverse`: the track-walking primitive and scoring

pub mod legality;
pub mod square;
pub mod stations;
pub mod traverse;

pub use square::{BoardSquare, SquareKind, TrackStatus};
pub use stations::StationInfo;
pub use traverse::{TrackScore, TrackStep, MAX_TRACK_HOPS};

use serde::{Deserialize, Serialize};

use crate::core::{GameError, PlayerId};
use crate::tiles::TilePool;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells.
pub const BOARD_HEIGHT: usize = 10;

/// Number of border stations.
pub const NUM_STATIONS: usize = 32;

/// The 10x10 game board.
///
/// The legality bitmap is valid only for the tile most recently passed to
/// [`Board::mark_legal_moves`]; callers interleaving queries for different
/// tiles must re-mark in between.
///
/// `Clone` is a deep copy (grid, bitmap, statuses, and pool are all owned
/// by value), which is what hands the AI a sandbox that cannot alias the
/// authoritative board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    squares: [[BoardSquare; BOARD_HEIGHT]; BOARD_WIDTH],
    legal: [[bool; BOARD_HEIGHT]; BOARD_WIDTH],
    track_status: [TrackStatus; NUM_STATIONS],
    pool: TilePool,
}

impl Board {
    /// Build the fixed topology around the given pool.
    #[must_use]
    pub fn new(pool: TilePool) -> Self {
        let mut squares =
            [[BoardSquare::new(SquareKind::Open); BOARD_HEIGHT]; BOARD_WIDTH];

        // Border stations, sides first.
        for x in 1..BOARD_WIDTH - 1 {
            squares[x][0].kind = SquareKind::Station;
            squares[x][BOARD_HEIGHT - 1].kind = SquareKind::Station;
        }
        for y in 1..BOARD_HEIGHT - 1 {
            squares[0][y].kind = SquareKind::Station;
            squares[BOARD_WIDTH - 1][y].kind = SquareKind::Station;
        }

        // Central station block.
        squares[4][4].kind = SquareKind::CentralStation;
        squares[4][5].kind = SquareKind::CentralStation;
        squares[5][4].kind = SquareKind::CentralStation;
        squares[5][5].kind = SquareKind::CentralStation;

        // Corners.
        squares[0][0].kind = SquareKind::Corner;
        squares[0][BOARD_HEIGHT - 1].kind = SquareKind::Corner;
        squares[BOARD_WIDTH - 1][0].kind = SquareKind::Corner;
        squares[BOARD_WIDTH - 1][BOARD_HEIGHT - 1].kind = SquareKind::Corner;

        Self {
            squares,
            legal: [[false; BOARD_HEIGHT]; BOARD_WIDTH],
            track_status: [TrackStatus::NotComplete; NUM_STATIONS],
            pool,
        }
    }

    /// The cell at (x, y).
    ///
    /// Fails with [`GameError::InvalidArgument`] out of range.
    pub fn square(&self, x: usize, y: usize) -> Result<&BoardSquare, GameError> {
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return Err(GameError::InvalidArgument("board coordinate"));
        }
        Ok(&self.squares[x][y])
    }

    pub(crate) fn square_mut(&mut self, x: usize, y: usize) -> &mut BoardSquare {
        &mut self.squares[x][y]
    }

    /// The train marker at (x, y), if any.
    #[must_use]
    pub fn train_at(&self, x: usize, y: usize) -> Option<PlayerId> {
        self.square(x, y).ok().and_then(|sq| sq.train)
    }

    /// Scoring status of a station's track.
    pub fn track_status(&self, station: usize) -> Result<TrackStatus, GameError> {
        self.track_status
            .get(station)
            .copied()
            .ok_or(GameError::InvalidArgument("station index"))
    }

    pub(crate) fn set_track_status(&mut self, station: usize, status: TrackStatus) {
        if let Some(slot) = self.track_status.get_mut(station) {
            *slot = status;
        }
    }

    /// The board's tile pool.
    #[must_use]
    pub fn pool(&self) -> &TilePool {
        &self.pool
    }

    /// Mutable access to the tile pool (draws and discards go through
    /// here; the board and pool share one lifecycle).
    pub fn pool_mut(&mut self) -> &mut TilePool {
        &mut self.pool
    }

    pub(crate) fn in_bounds(x: usize, y: usize) -> bool {
        x < BOARD_WIDTH && y < BOARD_HEIGHT
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(TilePool::new())
    }
}
