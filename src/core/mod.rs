//! Core engine types: errors, players, RNG, configuration.
//!
//! This module contains the building blocks shared by every other part of
//! the engine; nothing here knows about the board topology or turn flow.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameOptions, ShowLastMove};
pub use error::GameError;
pub use player::{AiLevel, Control, HeldSlot, Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
