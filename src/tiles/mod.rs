//! Tiles and the tile pool.

pub mod pool;
pub mod tile;

pub use pool::{TilePool, POOL_SIZE};
pub use tile::{Tile, TileId, NUM_TILE_EXITS};
