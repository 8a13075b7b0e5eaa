use std::fmt;

use tracing::warn;

use crate::error::Result;

use super::ffmpeg::{is_ffmpeg_on_path, EncodeConfig, FfmpegEncoder};
use super::gif::GifSink;
use super::sink::VideoSink;

/// Container a timelapse is written as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoFormat {
    /// H.264 (or the configured codec) through ffmpeg.
    Mp4,
    /// Animated GIF, used when ffmpeg is not installed.
    Gif,
}

impl VideoFormat {
    /// Mp4 when ffmpeg is on PATH, Gif otherwise.
    pub fn detect() -> Self {
        if is_ffmpeg_on_path() {
            Self::Mp4
        } else {
            warn!("ffmpeg not found on PATH, falling back to animated GIF");
            Self::Gif
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Gif => "gif",
        }
    }

    /// Open the sink that writes this format.
    pub fn open(self, cfg: EncodeConfig) -> Result<Box<dyn VideoSink>> {
        Ok(match self {
            Self::Mp4 => Box::new(FfmpegEncoder::open(cfg)?),
            Self::Gif => Box::new(GifSink::open(cfg)?),
        })
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mp4 => write!(f, "MP4 (ffmpeg)"),
            Self::Gif => write!(f, "Animated GIF"),
        }
    }
}
