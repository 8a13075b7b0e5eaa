use image::{imageops, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::{Result, TilelapseError};
use crate::fetch::TileFetchResult;
use crate::outcome::{BatchSummary, UnitOutcome};

use super::grid::MosaicGrid;

/// A merged mosaic plus what happened to each of its cells.
#[derive(Clone, Debug)]
pub struct MosaicAssembly {
    pub image: RgbaImage,
    /// One entry per grid cell, in grid order.
    pub outcomes: Vec<UnitOutcome>,
    pub summary: BatchSummary,
}

/// Number of results that carry tile bytes.
pub fn fetched_count(results: &[TileFetchResult]) -> usize {
    results.iter().filter(|r| r.is_fetched()).count()
}

/// Paste fetched tiles into a canvas of the grid's full size.
///
/// Absent tiles and tiles that fail to decode leave their cell filled with
/// `background`. The canvas size never depends on how many tiles arrived.
pub fn assemble(
    grid: &MosaicGrid,
    results: &[TileFetchResult],
    background: Rgba<u8>,
) -> Result<MosaicAssembly> {
    if results.len() != grid.cell_count() {
        return Err(TilelapseError::config(format!(
            "Expected {} tile results, got {}",
            grid.cell_count(),
            results.len()
        )));
    }

    let (width, height) = grid.canvas_size();
    let (tile_w, tile_h) = grid.tile_size();
    let mut image = RgbaImage::from_pixel(width, height, background);
    let mut outcomes = Vec::with_capacity(results.len());

    for (index, (result, coord)) in results.iter().zip(grid.coordinates()).enumerate() {
        let Some(bytes) = result.bytes() else {
            outcomes.push(UnitOutcome::Absent);
            continue;
        };

        match image::load_from_memory(bytes) {
            Ok(tile) => {
                let mut tile = tile.to_rgba8();
                if tile.dimensions() != (tile_w, tile_h) {
                    debug!(
                        tile = %coord,
                        width = tile.width(),
                        height = tile.height(),
                        "Tile size differs from grid cell"
                    );
                    // Oversized tiles must not spill into neighbouring cells.
                    let (w, h) = (tile.width().min(tile_w), tile.height().min(tile_h));
                    tile = imageops::crop_imm(&tile, 0, 0, w, h).to_image();
                }
                let (x, y) = grid.cell_origin(index);
                imageops::replace(&mut image, &tile, i64::from(x), i64::from(y));
                outcomes.push(UnitOutcome::Success);
            }
            Err(e) => {
                warn!(tile = %coord, error = %e, "Failed to decode tile");
                outcomes.push(UnitOutcome::Failed(e.to_string()));
            }
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(width, height, %summary, "Mosaic assembled");

    Ok(MosaicAssembly {
        image,
        outcomes,
        summary,
    })
}
