//! Track traversal and scoring.
//!
//! [`Board::find_next_track_section`] is the single geometric primitive:
//! crossing an edge slot moves one cell in the implied direction and lands
//! on the mirrored slot of the neighbor. Scoring, completion checking, and
//! renderer overlays all walk tracks through it, so there is exactly one
//! notion of "the next piece of track" in the engine.

use serde::{Deserialize, Serialize};

use super::{Board, SquareKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::GameError;
use crate::tiles::TileId;

/// Hard bound on track walks.
///
/// A valid track crosses each of the 60 tiles at most four times, so any
/// walk longer than this means the board is corrupt; the walk reports it
/// instead of looping.
pub const MAX_TRACK_HOPS: u32 = 255;

/// One step of a track walk: the neighbor cell, the slot the track enters
/// it through, and what occupies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStep {
    pub x: usize,
    pub y: usize,
    /// Entry slot on the neighbor cell.
    pub entry: u8,
    /// What the walk landed on.
    pub kind: SquareKind,
}

/// Result of scoring a station's track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackScore {
    /// One point per tile crossed, doubled on central-station termination.
    pub score: u32,

    /// The cell type the track stopped on. [`SquareKind::is_terminal`]
    /// distinguishes a finished track from one still growing.
    pub destination: SquareKind,

    /// Whether the walk crossed the tile id given as `pass_through`.
    pub passed_through: bool,
}

impl Board {
    /// Cross edge slot `exit` of cell (x, y) onto the adjacent cell.
    ///
    /// Slots 0/1 face up, 2/3 right, 4/5 down, 6/7 left; the entry slot on
    /// the neighbor is the mirror of the exit (0↔5, 1↔4, 2↔7, 3↔6).
    ///
    /// Fails with [`GameError::InvalidArgument`] for a bad slot or a step
    /// off the board (which cannot happen while tiles stay interior).
    pub fn find_next_track_section(
        &self,
        x: usize,
        y: usize,
        exit: u8,
    ) -> Result<TrackStep, GameError> {
        let (dx, dy, entry): (isize, isize, u8) = match exit {
            0 => (0, -1, 5),
            1 => (0, -1, 4),
            2 => (1, 0, 7),
            3 => (1, 0, 6),
            4 => (0, 1, 1),
            5 => (0, 1, 0),
            6 => (-1, 0, 3),
            7 => (-1, 0, 2),
            _ => return Err(GameError::InvalidArgument("exit slot")),
        };

        let new_x = x as isize + dx;
        let new_y = y as isize + dy;
        if new_x < 0
            || new_y < 0
            || new_x as usize >= BOARD_WIDTH
            || new_y as usize >= BOARD_HEIGHT
        {
            return Err(GameError::InvalidArgument("board coordinate"));
        }

        let (new_x, new_y) = (new_x as usize, new_y as usize);
        Ok(TrackStep {
            x: new_x,
            y: new_y,
            entry,
            kind: self.square(new_x, new_y)?.kind,
        })
    }

    /// Walk the track leaving `station` and score it.
    ///
    /// Starts at the station's inward exit and follows tile pairings while
    /// the walk stays on played tiles, scoring one point per tile crossed;
    /// the score doubles when the walk terminates on a central station.
    /// When `pass_through` is given, the result records whether that tile
    /// was ever crossed (the AI's attribution signal).
    ///
    /// Preconditions: the station index must be valid, the cell must be a
    /// station, and a train must be present ([`GameError::NoTrain`]).
    /// A walk exceeding [`MAX_TRACK_HOPS`] reports
    /// [`GameError::MalformedTrack`].
    pub fn calculate_track_score(
        &self,
        station: usize,
        pass_through: Option<TileId>,
    ) -> Result<TrackScore, GameError> {
        let info = Self::station_info(station)?;
        let start = self.square(info.x, info.y)?;

        if start.kind != SquareKind::Station {
            return Err(GameError::NotAStation {
                x: info.x,
                y: info.y,
            });
        }
        if start.train.is_none() {
            return Err(GameError::NoTrain(station));
        }

        let mut passed_through = false;
        let mut score = 0u32;
        let mut hops = 0u32;
        let mut step = self.find_next_track_section(info.x, info.y, info.exit)?;

        while let SquareKind::Played(id) = step.kind {
            if hops >= MAX_TRACK_HOPS {
                return Err(GameError::MalformedTrack(MAX_TRACK_HOPS));
            }

            if pass_through == Some(id) {
                passed_through = true;
            }
            score += 1;
            hops += 1;

            let exit = self.pool().tile(id)?.exit_for(step.entry)?;
            step = self.find_next_track_section(step.x, step.y, exit)?;
        }

        if step.kind == SquareKind::CentralStation {
            score *= 2;
        }

        Ok(TrackScore {
            score,
            destination: step.kind,
            passed_through,
        })
    }
}
