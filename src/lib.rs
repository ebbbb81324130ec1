//! # railgrid
//!
//! Rules and AI engine for a 2-6 player tile-laying rail game: players
//! extend tracks across a fixed 10x10 grid to connect border stations;
//! a completed track scores one point per tile crossed, doubled when it
//! terminates at a central station.
//!
//! ## Design Principles
//!
//! 1. **Pure state transformer**: the engine is synchronous and
//!    single-threaded, invoked once per discrete player action. No clocks,
//!    no sleeps: the computer's "thinking" pause is a stored delay the
//!    driver polls against its own clock.
//!
//! 2. **Typed everything**: cell kinds, turn states, and AI decisions are
//!    exhaustive tagged enums; invalid states are unrepresentable rather
//!    than checked.
//!
//! 3. **Sandboxed speculation**: the computer player evaluates candidate
//!    placements on a deep clone of the board and pool, so what-if probing
//!    can never alias the authoritative match state.
//!
//! 4. **Deterministic given a seed**: the only randomness is the tile draw
//!    and the think-delay pick, both through one seeded ChaCha8 RNG.
//!
//! ## Modules
//!
//! - `core`: errors, player identity and seats, RNG, configuration
//! - `tiles`: tile connectivity and the 60-tile pool
//! - `board`: grid topology, legality, traversal, scoring
//! - `game`: the turn state machine and match orchestration
//! - `ai`: the heuristic computer player
//!
//! The rendering, input translation, and networking layers are external
//! collaborators: they read board and turn state through the accessors
//! and drive transitions through [`game::Game`].

pub mod ai;
pub mod board;
pub mod core;
pub mod game;
pub mod tiles;

/// Smallest supported match size.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported match size (and the fixed number of seat records).
pub const MAX_PLAYERS: usize = 6;

// Re-export commonly used types
pub use crate::core::{
    AiLevel, Control, GameError, GameOptions, GameRng, GameRngState, HeldSlot, Player, PlayerId,
    PlayerMap, ShowLastMove,
};

pub use crate::tiles::{Tile, TileId, TilePool, NUM_TILE_EXITS, POOL_SIZE};

pub use crate::board::{
    Board, BoardSquare, SquareKind, StationInfo, TrackScore, TrackStatus, TrackStep, BOARD_HEIGHT,
    BOARD_WIDTH, MAX_TRACK_HOPS, NUM_STATIONS,
};

pub use crate::game::{
    ActionValidity, Game, MoveRecord, PendingMove, TurnAction, TurnState,
};

pub use crate::ai::{determine_next_move, AiDecision};
