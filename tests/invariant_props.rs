//! Property tests for the structural invariants: tile involution, pool
//! bookkeeping, and the probe-and-revert symmetry the AI depends on.

use proptest::prelude::*;

use railgrid::{Board, GameRng, TileId, TilePool, POOL_SIZE};

proptest! {
    /// Every tile's slot pairing is a fixed-point-free involution.
    #[test]
    fn prop_tile_involution(id in 0u8..POOL_SIZE as u8, entry in 0u8..8) {
        let pool = TilePool::new();
        let tile = pool.tile(TileId::new(id)).unwrap();

        let exit = tile.exit_for(entry).unwrap();
        prop_assert_ne!(exit, entry);
        prop_assert_eq!(tile.exit_for(exit).unwrap(), entry);
    }

    /// Under any interleaving of draws and returns, played + unplayed
    /// stays at the pool size and no id is drawable twice.
    #[test]
    fn prop_pool_bookkeeping(
        seed in any::<u64>(),
        ops in proptest::collection::vec(any::<bool>(), 1..200),
    ) {
        let mut pool = TilePool::new();
        let mut rng = GameRng::new(seed);
        let mut in_play: Vec<TileId> = Vec::new();

        for draw in ops {
            if draw {
                match pool.draw_random_tile(&mut rng) {
                    Ok(id) => {
                        prop_assert!(!in_play.contains(&id), "{} drawn twice", id);
                        in_play.push(id);
                    }
                    Err(_) => prop_assert!(pool.is_exhausted()),
                }
            } else if let Some(id) = in_play.pop() {
                pool.return_tile_to_pool(id).unwrap();
            }

            prop_assert_eq!(pool.num_played() + pool.num_unplayed(), POOL_SIZE);
            prop_assert_eq!(pool.num_played(), in_play.len());
        }
    }

    /// Placing and removing any tile at any of its legal cells restores
    /// the board bit-identically, legality bitmap included.
    #[test]
    fn prop_place_remove_restores_board(id in 0u8..POOL_SIZE as u8) {
        let mut board = Board::default();
        let tile = *board.pool().tile(TileId::new(id)).unwrap();
        board.mark_legal_moves(&tile);

        let pristine = board.clone();

        for x in 1..9 {
            for y in 1..9 {
                if !pristine.is_legal_move(x, y) {
                    continue;
                }
                board.place_tile(x, y, TileId::new(id)).unwrap();
                board.remove_tile(x, y).unwrap();
                board.mark_legal_moves(&tile);
                prop_assert_eq!(&board, &pristine);
            }
        }
    }
}
