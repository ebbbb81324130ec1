//! Engine configuration.
//!
//! Drivers configure a match at startup with [`GameOptions`]. The flags
//! mirror the original options screen minus the audio settings, which
//! belong to the excluded presentation layer. The highlight flags are
//! engine passthroughs: the engine stores them so the renderer can consult
//! a single source of truth, but no rule depends on them.

use serde::{Deserialize, Serialize};

use super::player::AiLevel;

/// How much last-move information the renderer should surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowLastMove {
    /// Never show last-move markers.
    Off,
    /// Show only the previous seat's move.
    LastPlayer,
    /// Show every seat's most recent move.
    AllPlayers,
}

/// Match-level options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Highlight each player's live tracks.
    pub highlight_tracks: bool,

    /// Highlight the legal cells for the selected tile.
    pub highlight_legal_moves: bool,

    /// Last-move marker policy.
    pub show_last_move: ShowLastMove,

    /// Difficulty assigned to computer seats at setup.
    pub default_ai_level: AiLevel,

    /// Inclusive bounds (ms) of the computer "thinking" delay window.
    pub think_time_ms: (u64, u64),
}

impl GameOptions {
    /// Set the default AI difficulty.
    #[must_use]
    pub fn with_ai_level(mut self, level: AiLevel) -> Self {
        self.default_ai_level = level;
        self
    }

    /// Set the think-delay window bounds (ms, inclusive).
    #[must_use]
    pub fn with_think_time_ms(mut self, min: u64, max: u64) -> Self {
        self.think_time_ms = (min, max.max(min));
        self
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            highlight_tracks: true,
            highlight_legal_moves: true,
            show_last_move: ShowLastMove::AllPlayers,
            default_ai_level: AiLevel::Medium,
            think_time_ms: (1200, 2200),
        }
    }
}
