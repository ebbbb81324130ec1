//! The legal-move bitmap and tile placement/removal.
//!
//! Legality for a candidate tile is computed in four passes:
//!
//! 1. every cell starts legal, then stations, central stations, corners,
//!    and occupied cells are struck out;
//! 2. cells two or more steps from the border are struck out unless an
//!    orthogonal neighbor already holds a tile: past the first ring, new
//!    placements must touch the growing cluster;
//! 3. eight targeted exclusions strike cells where this particular tile
//!    would form a dead track of length one straight back into the
//!    adjacent border station (four side sweeps, four corner checks);
//! 4. if nothing is legal *and* the pool is empty, every still-open
//!    interior cell becomes legal so the end-game can always finish.

use log::trace;

use super::{Board, SquareKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::GameError;
use crate::tiles::{Tile, TileId};

impl Board {
    /// Recompute the legality bitmap for `tile` and return the number of
    /// legal cells.
    ///
    /// The bitmap stays valid only until the next call; queries for a
    /// different tile require re-marking.
    pub fn mark_legal_moves(&mut self, tile: &Tile) -> usize {
        for column in self.legal.iter_mut() {
            for cell in column.iter_mut() {
                *cell = true;
            }
        }

        // Stations and corners: the whole border ring.
        for x in 0..BOARD_WIDTH {
            self.legal[x][0] = false;
            self.legal[x][BOARD_HEIGHT - 1] = false;
        }
        for y in 0..BOARD_HEIGHT {
            self.legal[0][y] = false;
            self.legal[BOARD_WIDTH - 1][y] = false;
        }

        // Central stations.
        self.legal[4][4] = false;
        self.legal[4][5] = false;
        self.legal[5][4] = false;
        self.legal[5][5] = false;

        // Occupied interior cells.
        for x in 1..BOARD_WIDTH - 1 {
            for y in 1..BOARD_HEIGHT - 1 {
                if self.squares[x][y].kind.is_played() {
                    self.legal[x][y] = false;
                }
            }
        }

        // Inner ring: past the border-adjacent ring a placement must touch
        // the existing cluster through an orthogonal neighbor.
        for x in 2..BOARD_WIDTH - 2 {
            for y in 2..BOARD_HEIGHT - 2 {
                if !self.squares[x + 1][y].kind.is_played()
                    && !self.squares[x - 1][y].kind.is_played()
                    && !self.squares[x][y - 1].kind.is_played()
                    && !self.squares[x][y + 1].kind.is_played()
                {
                    self.legal[x][y] = false;
                }
            }
        }

        // Dead single-tile tracks along each side: a tile whose border-side
        // slots form a U-turn would run a one-tile track straight back into
        // the adjacent station.
        for i in 1..BOARD_WIDTH - 1 {
            if tile.connects(0, 1) {
                self.legal[i][1] = false;
            }
            if tile.connects(5, 4) {
                self.legal[i][BOARD_HEIGHT - 2] = false;
            }
        }
        for i in 1..BOARD_HEIGHT - 1 {
            if tile.connects(3, 2) {
                self.legal[BOARD_WIDTH - 2][i] = false;
            }
            if tile.connects(7, 6) {
                self.legal[1][i] = false;
            }
        }

        // The four corner cells see two stations; each has two dead
        // pairings of its own.
        if tile.connects(6, 1) || tile.connects(0, 7) {
            self.legal[1][1] = false;
        }
        if tile.connects(2, 1) || tile.connects(3, 0) {
            self.legal[BOARD_WIDTH - 2][1] = false;
        }
        if tile.connects(4, 3) || tile.connects(5, 2) {
            self.legal[BOARD_WIDTH - 2][BOARD_HEIGHT - 2] = false;
        }
        if tile.connects(5, 6) || tile.connects(4, 7) {
            self.legal[1][BOARD_HEIGHT - 2] = false;
        }

        let count = self.count_legal();

        // Forced end-game placement: with the pool dry there is no drawing
        // out of a dead hand, so any open cell becomes playable.
        if count == 0 && self.pool.is_exhausted() {
            trace!("no legal cells and pool exhausted; relaxing to all open cells");
            for x in 1..BOARD_WIDTH - 1 {
                for y in 1..BOARD_HEIGHT - 1 {
                    if self.squares[x][y].kind == SquareKind::Open {
                        self.legal[x][y] = true;
                    }
                }
            }
            return self.count_legal();
        }

        count
    }

    /// O(1) bitmap lookup for the most recently marked tile.
    ///
    /// Out-of-range coordinates are simply not legal.
    #[must_use]
    pub fn is_legal_move(&self, x: usize, y: usize) -> bool {
        Self::in_bounds(x, y) && self.legal[x][y]
    }

    /// Place `id` at (x, y).
    ///
    /// Fails with [`GameError::InvalidArgument`] out of range and
    /// [`GameError::IllegalMove`] unless the cell is open, empty, and
    /// marked legal for the current candidate tile.
    pub fn place_tile(&mut self, x: usize, y: usize, id: TileId) -> Result<(), GameError> {
        if !Self::in_bounds(x, y) {
            return Err(GameError::InvalidArgument("board coordinate"));
        }
        if self.squares[x][y].kind != SquareKind::Open || !self.legal[x][y] {
            return Err(GameError::IllegalMove { x, y });
        }

        self.squares[x][y].kind = SquareKind::Played(id);
        Ok(())
    }

    /// Remove the tile at (x, y), reverting the cell to open.
    ///
    /// The exact inverse of [`Board::place_tile`]; used both for genuine
    /// undo and for the AI's probe-and-revert cycle. Returns the removed
    /// id.
    pub fn remove_tile(&mut self, x: usize, y: usize) -> Result<TileId, GameError> {
        if !Self::in_bounds(x, y) {
            return Err(GameError::InvalidArgument("board coordinate"));
        }

        match self.squares[x][y].kind {
            SquareKind::Played(id) => {
                self.squares[x][y].kind = SquareKind::Open;
                Ok(id)
            }
            _ => Err(GameError::IllegalMove { x, y }),
        }
    }

    fn count_legal(&self) -> usize {
        self.legal
            .iter()
            .flat_map(|column| column.iter())
            .filter(|&&cell| cell)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::tiles::TilePool;

    // Straight-through pattern: no border-side U-turns anywhere.
    fn straights() -> Tile {
        Tile::new([5, 4, 7, 6, 1, 0, 3, 2], 2)
    }

    // All four sides U-turned: dead against every border line.
    fn u_turns() -> Tile {
        Tile::new([1, 0, 3, 2, 5, 4, 7, 6], 1)
    }

    #[test]
    fn test_fresh_board_ring_legality() {
        let mut board = Board::default();
        let count = board.mark_legal_moves(&straights());

        // Border-adjacent ring cells are legal, deep interior is not.
        assert!(board.is_legal_move(1, 1));
        assert!(board.is_legal_move(5, 1));
        assert!(board.is_legal_move(1, 6));
        assert!(board.is_legal_move(8, 8));
        assert!(!board.is_legal_move(2, 2));
        assert!(!board.is_legal_move(5, 6));

        // The ring is 28 cells; nothing deeper qualifies yet.
        assert_eq!(count, 28);
    }

    #[test]
    fn test_station_and_corner_cells_never_legal() {
        let mut board = Board::default();
        board.mark_legal_moves(&straights());

        assert!(!board.is_legal_move(0, 0));
        assert!(!board.is_legal_move(5, 0));
        assert!(!board.is_legal_move(0, 5));
        assert!(!board.is_legal_move(4, 4));
        assert!(!board.is_legal_move(5, 5));
        assert!(!board.is_legal_move(10, 3));
    }

    #[test]
    fn test_dead_single_tile_sides_excluded() {
        let mut board = Board::default();
        let count = board.mark_legal_moves(&u_turns());

        // A full-U tile dead-ends against every border line, and the deep
        // interior has no adjacency yet: nothing is playable.
        for i in 1..9 {
            assert!(!board.is_legal_move(i, 1), "({i}, 1) should be dead");
            assert!(!board.is_legal_move(i, 8), "({i}, 8) should be dead");
            assert!(!board.is_legal_move(1, i), "(1, {i}) should be dead");
            assert!(!board.is_legal_move(8, i), "(8, {i}) should be dead");
        }
        assert_eq!(count, 0);
    }

    #[test]
    fn test_adjacency_opens_interior() {
        let mut board = Board::default();
        let tile = straights();

        board.mark_legal_moves(&tile);
        board.place_tile(1, 2, TileId::new(2)).unwrap();
        board.mark_legal_moves(&tile);

        // (2, 2) now touches the cluster.
        assert!(board.is_legal_move(2, 2));
        // (3, 2) still doesn't.
        assert!(!board.is_legal_move(3, 2));
        // The occupied cell itself is out.
        assert!(!board.is_legal_move(1, 2));
    }

    #[test]
    fn test_place_requires_marked_legality() {
        let mut board = Board::default();
        board.mark_legal_moves(&straights());

        assert_eq!(
            board.place_tile(5, 5, TileId::new(0)),
            Err(GameError::IllegalMove { x: 5, y: 5 })
        );
        assert_eq!(
            board.place_tile(4, 4, TileId::new(0)),
            Err(GameError::IllegalMove { x: 4, y: 4 })
        );
        assert_eq!(
            board.place_tile(12, 1, TileId::new(0)),
            Err(GameError::InvalidArgument("board coordinate"))
        );

        board.place_tile(1, 1, TileId::new(2)).unwrap();
        // Same cell again: occupied now.
        assert_eq!(
            board.place_tile(1, 1, TileId::new(3)),
            Err(GameError::IllegalMove { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_place_then_remove_restores_state() {
        let mut board = Board::default();
        let tile = straights();
        board.mark_legal_moves(&tile);

        let before = board.clone();

        board.place_tile(3, 1, TileId::new(4)).unwrap();
        assert_eq!(
            board.square(3, 1).unwrap().kind,
            SquareKind::Played(TileId::new(4))
        );

        assert_eq!(board.remove_tile(3, 1), Ok(TileId::new(4)));
        board.mark_legal_moves(&tile);

        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_empty_cell_rejected() {
        let mut board = Board::default();

        assert_eq!(
            board.remove_tile(3, 3),
            Err(GameError::IllegalMove { x: 3, y: 3 })
        );
        assert_eq!(
            board.remove_tile(0, 0),
            Err(GameError::IllegalMove { x: 0, y: 0 })
        );
    }

    #[test]
    fn test_forced_endgame_relaxation() {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(42);
        while !pool.is_exhausted() {
            pool.draw_random_tile(&mut rng).unwrap();
        }
        let mut board = Board::new(pool);

        // A full-U tile has zero normally legal cells on an empty board,
        // but with the pool dry every open interior cell relaxes open:
        // 8x8 interior minus the 4 central station cells.
        let count = board.mark_legal_moves(&u_turns());
        assert_eq!(count, 60);
        assert!(board.is_legal_move(5, 6));
        assert!(board.is_legal_move(1, 1));
        assert!(!board.is_legal_move(4, 4));
    }
}
