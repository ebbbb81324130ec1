//! Turn flow and match orchestration.
//!
//! [`Game`] glues the board, pool, and seats together behind the turn
//! state machine. One external call drives one discrete action; states
//! that need no external choice chain onward synchronously.

pub mod engine;
pub mod state;

pub use engine::Game;
pub use state::{ActionValidity, MoveRecord, PendingMove, TurnAction, TurnState};
