//! Station geometry and ownership.
//!
//! The 32 border stations are numbered clockwise starting at the top-left:
//! 0-7 across the top, 8-15 down the right side, 16-23 across the bottom
//! (right to left), 24-31 up the left side. Each station faces the board
//! with a fixed inward exit slot.
//!
//! Ownership depends on the player count: each row of [`STATION_OWNERS`]
//! distributes the stations among 2-6 seats. With 5 players the count does
//! not divide evenly and four stations stay unowned.

use serde::{Deserialize, Serialize};

use super::{Board, BOARD_HEIGHT, BOARD_WIDTH, NUM_STATIONS};
use crate::core::{GameError, PlayerId};
use crate::{MAX_PLAYERS, MIN_PLAYERS};

/// Seat numbers (1-based, 0 = unowned) for every station, per player
/// count. Row 0 covers 2-player games, row 4 covers 6-player games.
const STATION_OWNERS: [[u8; NUM_STATIONS]; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    [
        2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1,
        2, 1,
    ],
    [
        2, 1, 3, 2, 3, 2, 1, 3, 1, 3, 2, 1, 3, 1, 2, 0, 0, 3, 1, 2, 3, 1, 2, 3, 2, 3, 1, 2, 1, 3,
        2, 1,
    ],
    [
        3, 4, 1, 2, 4, 3, 2, 1, 4, 3, 2, 1, 4, 3, 1, 2, 4, 3, 1, 2, 3, 4, 2, 1, 3, 4, 2, 1, 4, 3,
        1, 2,
    ],
    [
        2, 4, 3, 5, 2, 1, 3, 5, 4, 2, 5, 1, 4, 2, 3, 0, 0, 1, 3, 5, 4, 2, 1, 5, 3, 4, 1, 2, 3, 4,
        5, 1,
    ],
    [
        2, 1, 5, 3, 2, 4, 6, 3, 5, 2, 1, 6, 5, 3, 4, 0, 0, 1, 2, 4, 3, 6, 5, 4, 1, 3, 2, 6, 1, 5,
        4, 6,
    ],
];

/// A station's board cell and inward-facing exit slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationInfo {
    pub x: usize,
    pub y: usize,
    /// The tile slot a track leaves the station through.
    pub exit: u8,
}

impl Board {
    /// Coordinates and inward exit slot of a station.
    ///
    /// Fails with [`GameError::InvalidArgument`] for indices outside 0-31.
    pub fn station_info(station: usize) -> Result<StationInfo, GameError> {
        let info = match station {
            0..=7 => StationInfo {
                x: 1 + station,
                y: 0,
                exit: 5,
            },
            8..=15 => StationInfo {
                x: BOARD_WIDTH - 1,
                y: 1 + (station - 8),
                exit: 7,
            },
            16..=23 => StationInfo {
                x: 8 - (station - 16),
                y: BOARD_HEIGHT - 1,
                exit: 1,
            },
            24..=31 => StationInfo {
                x: 0,
                y: 8 - (station - 24),
                exit: 3,
            },
            _ => return Err(GameError::InvalidArgument("station index")),
        };

        Ok(info)
    }

    /// The station number at (x, y), the inverse of [`Board::station_info`].
    ///
    /// Fails with [`GameError::NotAStation`] for any non-border-station
    /// coordinate (including corners and interior cells).
    pub fn station_number(x: usize, y: usize) -> Result<usize, GameError> {
        let border_y = y >= 1 && y < BOARD_HEIGHT - 1;
        let border_x = x >= 1 && x < BOARD_WIDTH - 1;

        if x == 0 && border_y {
            Ok(32 - y)
        } else if x == BOARD_WIDTH - 1 && border_y {
            Ok(7 + y)
        } else if y == 0 && border_x {
            Ok(x - 1)
        } else if y == BOARD_HEIGHT - 1 && border_x {
            Ok(24 - x)
        } else {
            Err(GameError::NotAStation { x, y })
        }
    }

    /// The seat owning a station at the given player count.
    ///
    /// Returns `None` for unowned stations and for counts/indices outside
    /// the tables.
    #[must_use]
    pub fn station_owner(player_count: usize, station: usize) -> Option<PlayerId> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) || station >= NUM_STATIONS {
            return None;
        }

        match STATION_OWNERS[player_count - MIN_PLAYERS][station] {
            0 => None,
            seat => Some(PlayerId::new(seat - 1)),
        }
    }
}
