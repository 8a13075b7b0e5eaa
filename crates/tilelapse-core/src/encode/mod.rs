//! Sequential video output.

mod ffmpeg;
mod format;
mod gif;
mod sink;

pub use ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path, rgb_to_bgr, EncodeConfig, FfmpegEncoder};
pub use format::VideoFormat;
pub use gif::GifSink;
pub use sink::VideoSink;
