//! Candidate evaluation and difficulty-based selection.
//!
//! Evaluation runs entirely inside a sandbox board: place the candidate,
//! re-score every live track that passes through it, revert, record. The
//! weights favor keeping the acting player's tracks growing (an open track
//! is worth more future points than a short closed one) and penalize
//! helping opponents symmetrically.

use log::trace;
use smallvec::SmallVec;

use crate::board::{Board, SquareKind, BOARD_HEIGHT, BOARD_WIDTH, NUM_STATIONS};
use crate::core::{AiLevel, HeldSlot, PlayerId};
use crate::tiles::TileId;

/// Weight for a track still touching open cells after the placement.
const INCOMPLETE_TRACK_WEIGHT: f32 = 3.0;

/// Weight for a track closed at a plain station.
const COMPLETE_TRACK_WEIGHT: f32 = 1.0;

/// Weight for a track closed at a central station.
const COMPLETE_CENTRAL_STATION_WEIGHT: f32 = 2.0;

/// One evaluated candidate placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MoveEval {
    pub slot: HeldSlot,
    pub x: usize,
    pub y: usize,
    pub value: i32,
}

/// Candidate list; a hand's worth of placements fits without spilling.
pub(crate) type EvalList = SmallVec<[MoveEval; 16]>;

/// Evaluate every currently legal cell for `tile_id`.
///
/// The sandbox must have its legality bitmap marked for `tile_id` before
/// the call. Each probe is placed, scored across all stations with active
/// trains (only tracks that actually cross the probe contribute), and
/// reverted, leaving the sandbox cells exactly as found.
pub(crate) fn analyze_moves(
    sandbox: &mut Board,
    player_count: usize,
    acting: PlayerId,
    tile_id: TileId,
    slot: HeldSlot,
    evals: &mut EvalList,
) {
    for x in 1..BOARD_WIDTH - 1 {
        for y in 1..BOARD_HEIGHT - 1 {
            if !sandbox.is_legal_move(x, y) {
                continue;
            }
            if sandbox.place_tile(x, y, tile_id).is_err() {
                continue;
            }

            let mut value = 0i32;
            for station in 0..NUM_STATIONS {
                let present = Board::station_info(station)
                    .ok()
                    .and_then(|info| sandbox.train_at(info.x, info.y));
                if present.is_none() {
                    continue;
                }

                match sandbox.calculate_track_score(station, Some(tile_id)) {
                    Ok(result) if result.passed_through => {
                        let weight = match result.destination {
                            SquareKind::Open => INCOMPLETE_TRACK_WEIGHT,
                            SquareKind::Station => COMPLETE_TRACK_WEIGHT,
                            SquareKind::CentralStation => COMPLETE_CENTRAL_STATION_WEIGHT,
                            _ => 1.0,
                        };
                        let delta = (result.score as f32 * weight).round() as i32;
                        if Board::station_owner(player_count, station) == Some(acting) {
                            value += delta;
                        } else {
                            value -= delta;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        trace!("skipping station {station} during evaluation: {err}");
                    }
                }
            }

            // Revert the probe; place/remove are exact inverses.
            let _ = sandbox.remove_tile(x, y);
            evals.push(MoveEval { slot, x, y, value });
        }
    }
}

/// Pick a candidate from an ascending-sorted list by difficulty.
///
/// With fewer than three candidates, Hard and Medium take index 0 and Easy
/// takes the last. Otherwise Hard takes index 0, Medium aims a third of
/// the way up and walks down while the value is non-positive, and Easy
/// aims two thirds up. The index scheme is long-standing behavior kept
/// as-is; see DESIGN.md before changing it.
pub(crate) fn select_move(evals: &[MoveEval], level: AiLevel) -> Option<&MoveEval> {
    if evals.is_empty() {
        return None;
    }

    let n = evals.len();
    let index = if n < 3 {
        match level {
            AiLevel::Hard | AiLevel::Medium => 0,
            AiLevel::Easy => n - 1,
        }
    } else {
        match level {
            AiLevel::Hard => 0,
            AiLevel::Medium => {
                let mut index = ((n - 1) as f32 * 0.33) as usize;
                while index > 0 && evals[index].value <= 0 {
                    index -= 1;
                }
                index
            }
            AiLevel::Easy => ((n - 1) as f32 * 0.67) as usize,
        }
    };

    evals.get(index)
}
