use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TilelapseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No tiles fetched ({total} requested)")]
    NoTilesFetched { total: usize },

    #[error("No snapshots found in {}", dir.display())]
    NoSnapshots { dir: PathBuf },

    #[error("No frames written ({skipped} skipped)")]
    NoFramesWritten { skipped: usize },

    #[error("Encoder error: {0}")]
    Encoder(String),
}

impl TilelapseError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TilelapseError>;
