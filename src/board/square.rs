//! Board squares and per-station track status.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::tiles::TileId;

/// The type of a board cell.
///
/// Corners, the 32 border stations, and the central 2x2 station block are
/// fixed at construction; only `Open` cells ever change, flipping to
/// `Played` and back (the AI's probe-and-revert cycle relies on the exact
/// inverse).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareKind {
    /// A border cell where a train starts.
    Station,
    /// One of the four center cells; terminating here doubles a track.
    CentralStation,
    /// A playable, currently empty interior cell.
    Open,
    /// An unused corner cell.
    Corner,
    /// An interior cell occupied by the given tile.
    Played(TileId),
}

impl SquareKind {
    /// Whether this cell holds a placed tile.
    #[must_use]
    pub fn is_played(self) -> bool {
        matches!(self, SquareKind::Played(_))
    }

    /// Whether a completed track may terminate here.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SquareKind::Station | SquareKind::CentralStation)
    }

    /// The occupying tile id, if any.
    #[must_use]
    pub fn tile(self) -> Option<TileId> {
        match self {
            SquareKind::Played(id) => Some(id),
            _ => None,
        }
    }
}

/// One cell of the board: its type plus an optional train marker.
///
/// Trains sit only on station cells; the marker names the owning seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSquare {
    /// Cell type.
    pub kind: SquareKind,

    /// Owning seat of the train parked here, if one is present.
    pub train: Option<PlayerId>,
}

impl BoardSquare {
    pub(crate) fn new(kind: SquareKind) -> Self {
        Self { kind, train: None }
    }
}

/// Scoring lifecycle of a station's track.
///
/// `Complete` is transient: `check_for_completed_tracks` collapses it into
/// `Processed` within the same call, so observers only ever see
/// `NotComplete` or `Processed` between engine calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackStatus {
    NotComplete,
    Complete,
    Processed,
}
