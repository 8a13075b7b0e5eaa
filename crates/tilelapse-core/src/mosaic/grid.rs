use std::fmt;

use crate::error::{Result, TilelapseError};

/// Integer address of one server tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub x: u32,
    pub y: u32,
}

impl TileCoordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Substitute `{x}` and `{y}` in `template`.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// A fixed `columns x rows` layout of equally sized tiles.
///
/// `coordinates` is row-major: index `i` lands in row `i / columns`,
/// column `i % columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicGrid {
    columns: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
    coordinates: Vec<TileCoordinate>,
}

impl MosaicGrid {
    pub fn new(
        columns: u32,
        rows: u32,
        tile_width: u32,
        tile_height: u32,
        coordinates: Vec<TileCoordinate>,
    ) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(TilelapseError::config(format!(
                "Grid must have at least one cell, got {columns}x{rows}"
            )));
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(TilelapseError::InvalidDimensions {
                width: tile_width,
                height: tile_height,
            });
        }
        let cells = columns as usize * rows as usize;
        if coordinates.len() != cells {
            return Err(TilelapseError::config(format!(
                "Grid {columns}x{rows} needs {cells} coordinates, got {}",
                coordinates.len()
            )));
        }
        if columns.checked_mul(tile_width).is_none() || rows.checked_mul(tile_height).is_none() {
            return Err(TilelapseError::InvalidDimensions {
                width: tile_width,
                height: tile_height,
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            coordinates,
        })
    }

    /// Contiguous block of tiles starting at `(origin_x, origin_y)`.
    pub fn from_origin(
        origin_x: u32,
        origin_y: u32,
        columns: u32,
        rows: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self> {
        let coordinates = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |col| {
                    TileCoordinate::new(origin_x.saturating_add(col), origin_y.saturating_add(row))
                })
            })
            .collect();
        Self::new(columns, rows, tile_width, tile_height, coordinates)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    pub fn coordinates(&self) -> &[TileCoordinate] {
        &self.coordinates
    }

    pub fn cell_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Pixel size of the merged mosaic.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.columns * self.tile_width, self.rows * self.tile_height)
    }

    /// Top-left pixel of cell `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let row = index as u32 / self.columns;
        let col = index as u32 % self.columns;
        (col * self.tile_width, row * self.tile_height)
    }
}
