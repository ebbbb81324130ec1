//! Error taxonomy for the rules engine.
//!
//! Every error here is a local, recoverable result value. The engine is a
//! pure state transformer: a caller violating a precondition gets a typed
//! report back, never an abort. Drivers are expected to pre-check legality
//! (`is_legal_move`, the turn validity flags) before committing, so these
//! variants are mostly exercised by tests rather than live traffic.

use thiserror::Error;

use crate::tiles::TileId;

/// Engine error values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// A coordinate, slot, or index outside its valid range.
    #[error("argument out of range: {0}")]
    InvalidArgument(&'static str),

    /// A structurally valid placement or removal that the rules forbid.
    #[error("illegal move at ({x}, {y})")]
    IllegalMove { x: usize, y: usize },

    /// A draw was requested with no unplayed tiles remaining.
    #[error("tile pool exhausted")]
    PoolExhausted,

    /// A tile id that names no tile in the pool.
    #[error("no tile with id {0}")]
    NotFound(TileId),

    /// A pool operation that contradicts the played/unplayed bookkeeping.
    #[error("tile {0} is not currently in play")]
    InvalidState(TileId),

    /// Scoring was requested for a station with no active train.
    #[error("no train at station {0}")]
    NoTrain(usize),

    /// A coordinate that names no border station.
    #[error("({x}, {y}) is not a station")]
    NotAStation { x: usize, y: usize },

    /// Track traversal exceeded the hop bound; the board is corrupt.
    #[error("track traversal exceeded {0} hops")]
    MalformedTrack(u32),
}
