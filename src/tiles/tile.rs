//! A single playable tile and its track connectivity.
//!
//! Each tile has 8 edge slots, two per side, numbered clockwise from the
//! top-left:
//!
//! ```text
//! +--|--|--+
//! |  0  1  |
//! -7      2-
//! |        |
//! -6      3-
//! |  5  4  |
//! +--|--|--+
//! ```
//!
//! Every slot is paired with exactly one other slot, so a tile always
//! carries four track sections. The pairing is a fixed-point-free
//! involution: `exit_for(exit_for(i)) == i` and no slot exits onto itself.

use serde::{Deserialize, Serialize};

use crate::core::GameError;

/// Number of edge slots on a tile.
pub const NUM_TILE_EXITS: usize = 8;

/// Identifier of a tile in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw pool index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Static connectivity data for one physical tile.
///
/// Immutable after construction; the pool holds exactly one instance per
/// tile id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    exits: [u8; NUM_TILE_EXITS],
    strip_offset: u8,
}

impl Tile {
    /// Build a tile from its slot pairing.
    ///
    /// Panics if the pairing is not a fixed-point-free involution; the
    /// pool's pattern table is static, so a violation is a defect in the
    /// table, not a runtime condition.
    #[must_use]
    pub fn new(exits: [u8; NUM_TILE_EXITS], strip_offset: u8) -> Self {
        for (slot, &exit) in exits.iter().enumerate() {
            assert!(
                (exit as usize) < NUM_TILE_EXITS,
                "exit slot {exit} out of range"
            );
            assert!(exit as usize != slot, "slot {slot} exits onto itself");
            assert!(
                exits[exit as usize] as usize == slot,
                "slots {slot} and {exit} are not mutually paired"
            );
        }

        Self {
            exits,
            strip_offset,
        }
    }

    /// The paired slot for a given entry slot.
    ///
    /// Fails with [`GameError::InvalidArgument`] if `entry` is not a valid
    /// slot index.
    pub fn exit_for(&self, entry: u8) -> Result<u8, GameError> {
        if (entry as usize) >= NUM_TILE_EXITS {
            return Err(GameError::InvalidArgument("tile entry slot"));
        }

        Ok(self.exits[entry as usize])
    }

    /// Whether this tile joins `entry` directly to `exit`.
    ///
    /// Out-of-range slots simply don't connect.
    #[must_use]
    pub fn connects(&self, entry: u8, exit: u8) -> bool {
        self.exit_for(entry).map(|e| e == exit).unwrap_or(false)
    }

    /// Decorative grouping index used by renderers to pick artwork.
    /// Carries no rules meaning.
    #[must_use]
    pub fn strip_offset(&self) -> u8 {
        self.strip_offset
    }
}
