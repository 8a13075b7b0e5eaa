//! Grid geometry and tile-to-mosaic assembly.

mod assemble;
mod grid;

pub use assemble::{assemble, fetched_count, MosaicAssembly};
pub use grid::{MosaicGrid, TileCoordinate};
