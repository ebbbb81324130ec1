//! The heuristic computer player.
//!
//! Stateless: every call evaluates against a deep clone of the live board
//! plus the acting seat's hand, so speculation can never leak into the
//! authoritative game. One call yields one decision; the driver applies it
//! via [`Game::apply_computer_move`](crate::game::Game::apply_computer_move)
//! and calls back with the applied decision until `EndTurn` comes out.
//!
//! Decision shape per turn:
//!
//! - empty hand: draw while the pool lasts, otherwise pass;
//! - one tile: play it if it has a legal cell, otherwise draw (or pass on
//!   a dry pool);
//! - two tiles: play the better candidate across both, or discard the
//!   reserve when neither has a legal cell;
//! - after a draw the hand branches rerun; after anything else the turn
//!   ends (one placement per turn).

pub(crate) mod eval;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{AiLevel, HeldSlot};
use crate::game::Game;
use crate::tiles::TileId;

use self::eval::{analyze_moves, select_move, EvalList};

/// One computer decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiDecision {
    /// Draw a tile from the pool.
    Draw,
    /// Play the tile in `slot` at (x, y).
    Play { x: usize, y: usize, slot: HeldSlot },
    /// Return the tile in `slot` to the pool.
    Discard { slot: HeldSlot },
    /// Finish the turn.
    EndTurn,
}

/// Generate the next decision for the active (computer) seat.
///
/// `last_move` is the decision most recently applied this turn, if any.
pub fn determine_next_move(game: &Game, last_move: Option<&AiDecision>) -> AiDecision {
    let decision = match last_move {
        None | Some(AiDecision::Draw) => decide_from_hand(game),
        // One placement per turn: anything after a play or discard (or a
        // stray end-turn) closes out.
        Some(_) => AiDecision::EndTurn,
    };

    debug!("{} decided {:?}", game.current_player(), decision);
    decision
}

/// The 0-/1-/2-tile branches, shared by the fresh-turn and post-draw
/// paths.
fn decide_from_hand(game: &Game) -> AiDecision {
    let player = game.current();
    let acting = game.current_player();
    let level = player.ai_level;
    let pool_has_tiles = !game.board().pool().is_exhausted();

    let mut sandbox = game.board().clone();

    match (player.primary_tile, player.reserve_tile) {
        (None, None) => {
            if pool_has_tiles {
                AiDecision::Draw
            } else {
                AiDecision::EndTurn
            }
        }

        (Some(id), None) | (None, Some(id)) => {
            let slot = if player.primary_tile.is_some() {
                HeldSlot::Primary
            } else {
                HeldSlot::Reserve
            };

            let legal = mark_for(&mut sandbox, id);
            if legal == 0 {
                if pool_has_tiles {
                    AiDecision::Draw
                } else {
                    AiDecision::EndTurn
                }
            } else {
                let mut evals = EvalList::new();
                analyze_moves(
                    &mut sandbox,
                    game.player_count(),
                    acting,
                    id,
                    slot,
                    &mut evals,
                );
                pick_play(&mut evals, level)
            }
        }

        (Some(primary), Some(reserve)) => {
            let mut evals = EvalList::new();

            let legal = mark_for(&mut sandbox, primary);
            if legal > 0 {
                analyze_moves(
                    &mut sandbox,
                    game.player_count(),
                    acting,
                    primary,
                    HeldSlot::Primary,
                    &mut evals,
                );
            }

            let legal2 = mark_for(&mut sandbox, reserve);
            if legal2 > 0 {
                analyze_moves(
                    &mut sandbox,
                    game.player_count(),
                    acting,
                    reserve,
                    HeldSlot::Reserve,
                    &mut evals,
                );
            }

            if legal == 0 && legal2 == 0 {
                AiDecision::Discard {
                    slot: HeldSlot::Reserve,
                }
            } else {
                pick_play(&mut evals, level)
            }
        }
    }
}

/// Mark the sandbox's legality bitmap for a held tile id.
///
/// A hand id that somehow fails to resolve counts as having no legal
/// moves rather than aborting the decision.
fn mark_for(sandbox: &mut Board, id: TileId) -> usize {
    match sandbox.pool().tile(id) {
        Ok(&tile) => sandbox.mark_legal_moves(&tile),
        Err(_) => 0,
    }
}

/// Sort ascending by value and select per difficulty.
fn pick_play(evals: &mut EvalList, level: AiLevel) -> AiDecision {
    evals.sort_by_key(|e| e.value);

    match select_move(evals, level) {
        Some(chosen) => AiDecision::Play {
            x: chosen.x,
            y: chosen.y,
            slot: chosen.slot,
        },
        None => AiDecision::EndTurn,
    }
}
