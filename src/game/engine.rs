//! The `Game` orchestrator: seats, turn flow, scoring, and the computer
//! move gate.
//!
//! `Game` owns the board (which owns the pool), the six seat records, the
//! turn state machine, and the per-turn scratch. External drivers call
//! [`Game::change_state`] and the commit methods; everything else is
//! derived state they read back.

use im::Vector;
use log::debug;

use super::state::{ActionValidity, MoveRecord, PendingMove, TurnAction, TurnState};
use crate::ai::AiDecision;
use crate::board::{Board, TrackStatus, NUM_STATIONS};
use crate::core::{Control, GameError, GameOptions, GameRng, HeldSlot, Player, PlayerId, PlayerMap};
use crate::tiles::{TileId, TilePool};
use crate::{MAX_PLAYERS, MIN_PLAYERS};

/// One match of the game.
///
/// Created once; [`Game::reset`] reinitializes the board, pool, and turn
/// flags for a fresh match without recreating the seat records.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: PlayerMap<Player>,
    num_players: usize,
    stations_per_player: usize,
    cur_player: PlayerId,

    state: TurnState,
    previous_state: TurnState,
    state_changed: bool,

    has_drawn: bool,
    validity: ActionValidity,
    pending: PendingMove,
    think_delay_ms: Option<u64>,

    history: Vector<MoveRecord>,
    options: GameOptions,
    rng: GameRng,
}

impl Game {
    /// Create a new match with the given options and RNG seed.
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let ai_level = options.default_ai_level;
        Self {
            board: Board::new(TilePool::new()),
            players: PlayerMap::new(MAX_PLAYERS, |_| Player::vacant(ai_level)),
            num_players: 0,
            stations_per_player: 0,
            cur_player: PlayerId::new(0),
            state: TurnState::Default,
            previous_state: TurnState::Default,
            state_changed: false,
            has_drawn: false,
            validity: ActionValidity::default(),
            pending: PendingMove::default(),
            think_delay_ms: None,
            history: Vector::new(),
            options,
            rng: GameRng::new(seed),
        }
    }

    /// Reset for a fresh match.
    ///
    /// Rebuilds the board and pool, clears turn flags and history, and
    /// wipes each seat's per-match fields while keeping who sits where.
    /// Trains are re-placed when seats are already configured.
    pub fn reset(&mut self) {
        self.board = Board::new(TilePool::new());
        self.cur_player = PlayerId::new(0);
        self.state = TurnState::Default;
        self.previous_state = TurnState::Default;
        self.state_changed = false;
        self.has_drawn = false;
        self.validity = ActionValidity::default();
        self.pending.clear();
        self.think_delay_ms = None;
        self.history = Vector::new();

        for (_, player) in self.players.iter_mut() {
            player.clear_for_new_match();
        }
        if self.num_players >= MIN_PLAYERS {
            self.place_trains();
        }
    }

    /// Seat the players for a match.
    ///
    /// `seats` lists the control for each active seat (2-6 entries);
    /// remaining seats become vacant. Computer seats get the configured
    /// default difficulty. Trains are placed on every owned station.
    pub fn init_players_from_selection(&mut self, seats: &[Control]) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats.len()) {
            return Err(GameError::InvalidArgument("active seat count"));
        }

        let ai_level = self.options.default_ai_level;
        for (id, player) in self.players.iter_mut() {
            *player = match seats.get(id.index()) {
                Some(&control) => Player::new(control, 0, ai_level),
                None => Player::vacant(ai_level),
            };
        }

        self.num_players = seats.len();
        self.stations_per_player = NUM_STATIONS / self.num_players;
        self.cur_player = PlayerId::new(0);
        self.place_trains();

        debug!("seated {} players", self.num_players);
        Ok(())
    }

    fn place_trains(&mut self) {
        for station in 0..NUM_STATIONS {
            // Station indices 0..NUM_STATIONS always resolve.
            if let Ok(info) = Board::station_info(station) {
                self.board.square_mut(info.x, info.y).train =
                    Board::station_owner(self.num_players, station);
            }
        }
    }

    /// Drive the turn state machine.
    ///
    /// Transitioning to `Default` is a no-op. Several states chain onward
    /// by themselves (see [`TurnState`]); the rest wait for the driver's
    /// next call.
    pub fn change_state(&mut self, state: TurnState) -> Result<(), GameError> {
        if state == TurnState::Default {
            return Ok(());
        }

        debug!("state {:?} -> {:?}", self.state, state);
        self.previous_state = self.state;
        self.state = state;
        self.state_changed = true;
        if state != TurnState::ComputerMove {
            self.think_delay_ms = None;
        }

        match state {
            TurnState::Default => {}

            TurnState::NextPlayerTurn => {
                // With a single human seated there is nobody to hide the
                // board from, so the "player N's turn" notice is skipped.
                let humans = self
                    .active_players()
                    .filter(|(_, p)| p.control == Control::Human)
                    .count();
                if humans == 1 || self.current().control == Control::Computer {
                    self.change_state(TurnState::SelectAction)?;
                }
            }

            TurnState::SelectAction => {
                if self.current().control == Control::Computer {
                    self.change_state(TurnState::ComputerMove)?;
                } else {
                    // A full hand means the draw is spent for this turn.
                    if self.current().held_count() == 2 {
                        self.has_drawn = true;
                    }
                    // Default the selection to the reserve tile if present.
                    self.pending.slot = Some(if self.current().reserve_tile.is_some() {
                        HeldSlot::Reserve
                    } else {
                        HeldSlot::Primary
                    });
                    self.compute_action_validity()?;
                }
            }

            TurnState::TileDraw => {
                self.draw_tile()?;
            }

            TurnState::TileSelect => {
                let player = self.current();
                let (id, slot) = match (player.primary_tile, player.reserve_tile) {
                    (_, Some(id)) => (id, HeldSlot::Reserve),
                    (Some(id), None) => (id, HeldSlot::Primary),
                    (None, None) => {
                        return Err(GameError::InvalidArgument("no held tile to select"))
                    }
                };
                self.pending.tile = Some(id);
                self.pending.slot = Some(slot);

                let tile = *self.board.pool().tile(id)?;
                self.board.mark_legal_moves(&tile);
            }

            TurnState::TilePlay => {
                let (x, y) = self
                    .pending
                    .cell
                    .ok_or(GameError::InvalidArgument("no staged placement"))?;
                let slot = self
                    .pending
                    .slot
                    .ok_or(GameError::InvalidArgument("no staged placement"))?;
                self.commit_play(x, y, slot)?;
                self.change_state(TurnState::EndTurn)?;
            }

            TurnState::Discard
            | TurnState::GameFinished
            | TurnState::ConfirmExit
            | TurnState::ShowBoard
            | TurnState::Pause => {}

            TurnState::EndTurn => {
                self.has_drawn = false;
                if self.num_players > 0 {
                    let next = (self.cur_player.index() + 1) % self.num_players;
                    self.cur_player = PlayerId::new(next as u8);
                }
                if self.check_for_end_of_game() {
                    self.change_state(TurnState::GameFinished)?;
                } else {
                    self.change_state(TurnState::NextPlayerTurn)?;
                }
            }

            TurnState::ComputerMove => {
                let (min, max) = self.options.think_time_ms;
                let delay = self.rng.gen_range_u64(min..=max.max(min));
                debug!("computer thinking for {delay} ms");
                self.think_delay_ms = Some(delay);
            }
        }

        Ok(())
    }

    /// Stage a placement for the active seat.
    ///
    /// Marks legality for the tile in `slot` and validates the target cell
    /// before staging; committing happens on the `TilePlay` transition.
    pub fn select_move(&mut self, x: usize, y: usize, slot: HeldSlot) -> Result<(), GameError> {
        let id = self
            .current()
            .held_tile(slot)
            .ok_or(GameError::InvalidArgument("empty hand slot"))?;

        let tile = *self.board.pool().tile(id)?;
        self.board.mark_legal_moves(&tile);
        if !self.board.is_legal_move(x, y) {
            return Err(GameError::IllegalMove { x, y });
        }

        self.pending = PendingMove {
            cell: Some((x, y)),
            tile: Some(id),
            slot: Some(slot),
        };
        Ok(())
    }

    /// Draw a tile from the pool into the active seat's hand.
    ///
    /// Fills the primary slot first, then the reserve. Sets the has-drawn
    /// flag and records the draw in the history.
    pub fn draw_tile(&mut self) -> Result<TileId, GameError> {
        if self.current().held_count() == 2 {
            return Err(GameError::InvalidArgument("hand already full"));
        }

        let id = self.board.pool_mut().draw_random_tile(&mut self.rng)?;
        let cur = self.cur_player;
        // Checked above: at least one slot is free.
        let slot = self.players[cur]
            .accept_tile(id)
            .ok_or(GameError::InvalidArgument("hand already full"))?;

        self.has_drawn = true;
        self.pending.tile = Some(id);
        self.pending.slot = Some(slot);
        self.history.push_back(MoveRecord {
            player: cur,
            action: TurnAction::Draw { tile: id },
        });

        debug!("{} drew {}", cur, id);
        Ok(id)
    }

    /// Return the staged tile to the pool and drop it from the hand.
    ///
    /// Commits only; the human confirm path wraps this with the `EndTurn`
    /// advance, while the computer path issues its own end-of-turn
    /// decision.
    pub fn discard_tile(&mut self) -> Result<TileId, GameError> {
        let id = self
            .pending
            .tile
            .ok_or(GameError::InvalidArgument("no staged discard"))?;
        let slot = self
            .pending
            .slot
            .ok_or(GameError::InvalidArgument("no staged discard"))?;
        if self.current().held_tile(slot) != Some(id) {
            return Err(GameError::InvalidArgument("staged tile not in hand slot"));
        }

        self.board.pool_mut().return_tile_to_pool(id)?;
        let cur = self.cur_player;
        self.players[cur].remove_held(slot);
        self.history.push_back(MoveRecord {
            player: cur,
            action: TurnAction::Discard { tile: id },
        });
        self.pending.clear();

        debug!("{} discarded {}", cur, id);
        Ok(id)
    }

    /// Discard the tile in `slot` and end the turn (human confirm path).
    pub fn confirm_discard(&mut self, slot: HeldSlot) -> Result<TileId, GameError> {
        let id = self
            .current()
            .held_tile(slot)
            .ok_or(GameError::InvalidArgument("empty hand slot"))?;
        self.pending.tile = Some(id);
        self.pending.slot = Some(slot);

        let id = self.discard_tile()?;
        self.change_state(TurnState::EndTurn)?;
        Ok(id)
    }

    /// Place the tile in `slot` at (x, y) and run completion scoring.
    fn commit_play(&mut self, x: usize, y: usize, slot: HeldSlot) -> Result<(), GameError> {
        let cur = self.cur_player;
        let id = self.players[cur]
            .held_tile(slot)
            .ok_or(GameError::InvalidArgument("empty hand slot"))?;

        let tile = *self.board.pool().tile(id)?;
        self.board.mark_legal_moves(&tile);
        self.board.place_tile(x, y, id)?;

        self.players[cur].remove_held(slot);
        self.players[cur].last_move = Some((x, y));
        self.history.push_back(MoveRecord {
            player: cur,
            action: TurnAction::Play { x, y, tile: id },
        });

        self.check_for_completed_tracks()?;
        self.pending.clear();

        debug!("{} played {} at ({x}, {y})", cur, id);
        Ok(())
    }

    /// Score every newly completed track.
    ///
    /// For each station with an active train and an unprocessed track,
    /// trace the track; if it terminates at a station or central station,
    /// award the score to the owner, clear the train, and mark the track
    /// processed, all within this call, so `Complete` never persists.
    /// Idempotent between placements.
    pub fn check_for_completed_tracks(&mut self) -> Result<(), GameError> {
        for station in 0..NUM_STATIONS {
            let info = Board::station_info(station)?;
            if self.board.square(info.x, info.y)?.train.is_none() {
                continue;
            }
            if self.board.track_status(station)? == TrackStatus::Processed {
                continue;
            }

            let result = self.board.calculate_track_score(station, None)?;
            if result.destination.is_terminal() {
                self.board.set_track_status(station, TrackStatus::Complete);
                self.process_completed_track(station, result.score)?;
            }
        }
        Ok(())
    }

    /// Award a completed track and retire its station.
    fn process_completed_track(&mut self, station: usize, score: u32) -> Result<(), GameError> {
        if self.board.track_status(station)? != TrackStatus::Complete {
            return Ok(());
        }

        if let Some(owner) = Board::station_owner(self.num_players, station) {
            let player = &mut self.players[owner];
            player.score += score;
            player.stations_complete += 1;
            debug!("station {station} complete: {score} points to {owner}");
        }

        let info = Board::station_info(station)?;
        self.board.square_mut(info.x, info.y).train = None;
        self.board.set_track_status(station, TrackStatus::Processed);
        Ok(())
    }

    /// The match ends when the pool is dry and no seat holds a tile.
    #[must_use]
    pub fn check_for_end_of_game(&self) -> bool {
        self.board.pool().is_exhausted() && self.active_players().all(|(_, p)| !p.is_holding())
    }

    /// Apply a computer decision exactly as the human path would.
    ///
    /// The AI supplies pre-validated decisions; this path commits them
    /// without re-deriving legality beyond the board's own checks.
    pub fn apply_computer_move(&mut self, decision: &AiDecision) -> Result<(), GameError> {
        match *decision {
            AiDecision::Draw => {
                self.draw_tile()?;
            }
            AiDecision::Play { x, y, slot } => {
                self.commit_play(x, y, slot)?;
            }
            AiDecision::Discard { slot } => {
                let id = self
                    .current()
                    .held_tile(slot)
                    .ok_or(GameError::InvalidArgument("empty hand slot"))?;
                self.pending.tile = Some(id);
                self.pending.slot = Some(slot);
                self.discard_tile()?;
            }
            AiDecision::EndTurn => {
                self.change_state(TurnState::EndTurn)?;
            }
        }
        Ok(())
    }

    /// Whether the scheduled think delay has elapsed.
    ///
    /// `elapsed_ms` is measured by the driver from its entry into
    /// `ComputerMove`; the engine never reads a clock.
    #[must_use]
    pub fn computer_move_ready(&self, elapsed_ms: u64) -> bool {
        self.state == TurnState::ComputerMove
            && self.think_delay_ms.is_some_and(|delay| elapsed_ms >= delay)
    }

    // === Read-only surface ===

    /// Current turn state.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// State before the most recent transition.
    #[must_use]
    pub fn previous_state(&self) -> TurnState {
        self.previous_state
    }

    /// Whether a transition happened since the last acknowledgment.
    #[must_use]
    pub fn state_changed(&self) -> bool {
        self.state_changed
    }

    /// Acknowledge the pending transition notification.
    pub fn clear_state_changed(&mut self) {
        self.state_changed = false;
    }

    /// Validity of the four actions for the active seat.
    #[must_use]
    pub fn validity(&self) -> ActionValidity {
        self.validity
    }

    /// The staged move, if any.
    #[must_use]
    pub fn pending(&self) -> PendingMove {
        self.pending
    }

    /// Whether the active seat has drawn this turn.
    #[must_use]
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    /// The scheduled think delay, while in `ComputerMove`.
    #[must_use]
    pub fn think_delay_ms(&self) -> Option<u64> {
        self.think_delay_ms
    }

    /// The active seat's id.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.cur_player
    }

    /// The active seat's record.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.cur_player]
    }

    /// A seat's record.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Iterate the active seats.
    pub fn active_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().take(self.num_players)
    }

    /// Number of active seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.num_players
    }

    /// Stations each seat owns at this player count.
    #[must_use]
    pub fn stations_per_player(&self) -> usize {
        self.stations_per_player
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for drivers wiring up bespoke scenarios.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The append-only move history.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// The match options.
    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Recompute the four action-validity flags for the active seat.
    ///
    /// Leaves the legality bitmap marked for the last checked held tile.
    fn compute_action_validity(&mut self) -> Result<(), GameError> {
        let mut play = false;
        for slot in [HeldSlot::Primary, HeldSlot::Reserve] {
            if let Some(id) = self.current().held_tile(slot) {
                let tile = *self.board.pool().tile(id)?;
                if self.board.mark_legal_moves(&tile) > 0 {
                    play = true;
                }
            }
        }

        self.validity = ActionValidity {
            play,
            draw: !self.board.pool().is_exhausted() && !self.has_drawn,
            discard: self.current().is_holding(),
            pass: true,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_human_game() -> Game {
        let mut game = Game::new(GameOptions::default(), 42);
        game.init_players_from_selection(&[Control::Human, Control::Human])
            .unwrap();
        game
    }

    #[test]
    fn test_seating_places_trains() {
        let game = two_human_game();

        assert_eq!(game.player_count(), 2);
        assert_eq!(game.stations_per_player(), 16);

        for station in 0..NUM_STATIONS {
            let info = Board::station_info(station).unwrap();
            assert_eq!(
                game.board().train_at(info.x, info.y),
                Board::station_owner(2, station)
            );
        }
    }

    #[test]
    fn test_seating_rejects_bad_counts() {
        let mut game = Game::new(GameOptions::default(), 42);

        assert!(game.init_players_from_selection(&[Control::Human]).is_err());
        assert!(game
            .init_players_from_selection(&[Control::Human; 7])
            .is_err());
    }

    #[test]
    fn test_select_action_validity_fresh_turn() {
        let mut game = two_human_game();
        game.change_state(TurnState::NextPlayerTurn).unwrap();

        // One human only would auto-skip; with two humans the notice state
        // rests first.
        assert_eq!(game.state(), TurnState::NextPlayerTurn);
        game.change_state(TurnState::SelectAction).unwrap();

        let validity = game.validity();
        assert!(!validity.play, "nothing held yet");
        assert!(validity.draw, "full pool, no draw yet");
        assert!(!validity.discard, "nothing held yet");
        assert!(validity.pass);
    }

    #[test]
    fn test_single_human_skips_turn_notice() {
        let mut game = Game::new(GameOptions::default(), 42);
        game.init_players_from_selection(&[Control::Human, Control::Computer])
            .unwrap();

        game.change_state(TurnState::NextPlayerTurn).unwrap();

        // Auto-advanced through the notice into action selection.
        assert_eq!(game.state(), TurnState::SelectAction);
    }

    #[test]
    fn test_computer_seat_routes_to_computer_move() {
        let mut game = Game::new(GameOptions::default(), 42);
        game.init_players_from_selection(&[Control::Computer, Control::Human])
            .unwrap();

        game.change_state(TurnState::NextPlayerTurn).unwrap();

        assert_eq!(game.state(), TurnState::ComputerMove);
        let delay = game.think_delay_ms().unwrap();
        let (min, max) = game.options().think_time_ms;
        assert!(delay >= min && delay <= max);

        assert!(!game.computer_move_ready(delay - 1));
        assert!(game.computer_move_ready(delay));
    }

    #[test]
    fn test_draw_fills_hand_and_flags() {
        let mut game = two_human_game();

        game.change_state(TurnState::TileDraw).unwrap();
        assert!(game.has_drawn());
        assert_eq!(game.current().held_count(), 1);
        assert_eq!(game.board().pool().num_played(), 1);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_draw_with_full_hand_rejected() {
        let mut game = two_human_game();
        game.draw_tile().unwrap();
        game.draw_tile().unwrap();

        assert_eq!(
            game.draw_tile().unwrap_err(),
            GameError::InvalidArgument("hand already full")
        );
    }

    #[test]
    fn test_play_flow_advances_turn() {
        let mut game = two_human_game();
        game.change_state(TurnState::NextPlayerTurn).unwrap();
        game.change_state(TurnState::SelectAction).unwrap();
        // Hold a known straight-through tile so (1, 1) is a legal cell.
        game.players[PlayerId::new(0)].primary_tile = Some(TileId::new(2));

        game.select_move(1, 1, HeldSlot::Primary).unwrap();
        game.change_state(TurnState::TilePlay).unwrap();

        // TilePlay chains through EndTurn into the next seat's turn.
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.state(), TurnState::NextPlayerTurn);
        assert!(!game.has_drawn());
        assert_eq!(game.player(PlayerId::new(0)).held_count(), 0);
        assert_eq!(game.player(PlayerId::new(0)).last_move, Some((1, 1)));
        assert!(game
            .board()
            .square(1, 1)
            .unwrap()
            .kind
            .is_played());
    }

    #[test]
    fn test_select_move_rejects_illegal_cell() {
        let mut game = two_human_game();
        game.draw_tile().unwrap();

        // Deep interior with no adjacency.
        assert_eq!(
            game.select_move(5, 6, HeldSlot::Primary).unwrap_err(),
            GameError::IllegalMove { x: 5, y: 6 }
        );
        // Empty slot.
        assert_eq!(
            game.select_move(1, 1, HeldSlot::Reserve).unwrap_err(),
            GameError::InvalidArgument("empty hand slot")
        );
    }

    #[test]
    fn test_confirm_discard_returns_tile_and_ends_turn() {
        let mut game = two_human_game();
        let id = game.draw_tile().unwrap();

        let discarded = game.confirm_discard(HeldSlot::Primary).unwrap();

        assert_eq!(discarded, id);
        assert_eq!(game.board().pool().num_played(), 0);
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.player(PlayerId::new(0)).held_count(), 0);
    }

    #[test]
    fn test_end_of_game_detection() {
        let mut game = two_human_game();
        assert!(!game.check_for_end_of_game());

        let mut rng = GameRng::new(0);
        while !game.board().pool().is_exhausted() {
            game.board_mut()
                .pool_mut()
                .draw_random_tile(&mut rng)
                .unwrap();
        }
        assert!(game.check_for_end_of_game());

        // A held tile keeps the game alive even with a dry pool.
        game.players[PlayerId::new(0)].primary_tile = Some(TileId::new(0));
        assert!(!game.check_for_end_of_game());
    }

    #[test]
    fn test_reset_keeps_seats() {
        let mut game = two_human_game();
        game.draw_tile().unwrap();
        game.players[PlayerId::new(0)].score = 9;

        game.reset();

        assert_eq!(game.player_count(), 2);
        assert_eq!(game.player(PlayerId::new(0)).control, Control::Human);
        assert_eq!(game.player(PlayerId::new(0)).score, 0);
        assert_eq!(game.player(PlayerId::new(0)).held_count(), 0);
        assert_eq!(game.board().pool().num_unplayed(), crate::tiles::POOL_SIZE);
        assert!(game.history().is_empty());

        // Trains are back for the rematch.
        let info = Board::station_info(0).unwrap();
        assert_eq!(
            game.board().train_at(info.x, info.y),
            Board::station_owner(2, 0)
        );
    }

    #[test]
    fn test_state_changed_acknowledgment() {
        let mut game = two_human_game();
        assert!(!game.state_changed());

        game.change_state(TurnState::ShowBoard).unwrap();
        assert!(game.state_changed());

        game.clear_state_changed();
        assert!(!game.state_changed());
    }
}
