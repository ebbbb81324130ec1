//! Turn-flow state types.

use serde::{Deserialize, Serialize};

use crate::core::{HeldSlot, PlayerId};
use crate::tiles::TileId;

/// The turn/game state machine's states.
///
/// States marked "resting" wait for an external actor (the driver) to pick
/// the next transition; the others run their work on entry and chain
/// onward by themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Initial state; transitioning to it is a no-op.
    Default,
    /// A new seat's turn is starting (resting unless auto-skipped).
    NextPlayerTurn,
    /// The active seat is choosing between draw/play/discard/pass.
    SelectAction,
    /// A tile was just drawn from the pool.
    TileDraw,
    /// The active seat is choosing where to play a held tile.
    TileSelect,
    /// A staged placement is being committed (chains to `EndTurn`).
    TilePlay,
    /// The active seat is choosing a tile to discard.
    Discard,
    /// Turn cleanup and seat advance (chains onward).
    EndTurn,
    /// The match is over.
    GameFinished,
    /// The driver is showing an exit confirmation.
    ConfirmExit,
    /// The driver is showing the full board.
    ShowBoard,
    /// The computer is "thinking"; gated on the think delay.
    ComputerMove,
    /// The driver paused the match.
    Pause,
}

/// Validity of the four turn actions for the active (human) seat.
///
/// Recomputed on entry to [`TurnState::SelectAction`]; drivers read these
/// to enable or disable their controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionValidity {
    /// Some held tile has at least one legal cell.
    pub play: bool,
    /// The pool has tiles and this seat hasn't drawn yet this turn.
    pub draw: bool,
    /// The seat holds at least one tile.
    pub discard: bool,
    /// Always available once the choice is offered.
    pub pass: bool,
}

/// Per-turn scratch for the move being staged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    /// Target cell of a staged placement.
    pub cell: Option<(usize, usize)>,
    /// The tile being played, drawn, or discarded.
    pub tile: Option<TileId>,
    /// Which hand slot the tile occupies.
    pub slot: Option<HeldSlot>,
}

impl PendingMove {
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A committed turn action, for the move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Draw { tile: TileId },
    Play { x: usize, y: usize, tile: TileId },
    Discard { tile: TileId },
}

/// One entry of the append-only move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The seat that acted.
    pub player: PlayerId,
    /// What it did.
    pub action: TurnAction,
}
