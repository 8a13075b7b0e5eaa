use std::fs::File;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use tracing::{debug, info};

use crate::consts::GIF_QUANTIZE_SPEED;
use crate::error::{Result, TilelapseError};

use super::ffmpeg::{ensure_parent_dir, EncodeConfig};
use super::sink::VideoSink;

/// Looping animated GIF writer, for hosts without ffmpeg.
///
/// The codec setting is ignored. Frame timing comes from `fps`, rounded by
/// the format to whole centiseconds.
pub struct GifSink {
    cfg: EncodeConfig,
    encoder: Option<GifEncoder<File>>,
    delay: Delay,
    frames: usize,
}

impl GifSink {
    pub fn open(cfg: EncodeConfig) -> Result<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(TilelapseError::encoder(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        let file = File::create(&cfg.out_path)?;
        let mut encoder = GifEncoder::new_with_speed(file, GIF_QUANTIZE_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;

        info!(
            path = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "Opened GIF stream"
        );

        Ok(Self {
            delay: Delay::from_numer_denom_ms(1000, cfg.fps),
            cfg,
            encoder: Some(encoder),
            frames: 0,
        })
    }
}

impl VideoSink for GifSink {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if frame.dimensions() != (self.cfg.width, self.cfg.height) {
            return Err(TilelapseError::encoder(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.cfg.width,
                self.cfg.height
            )));
        }
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(TilelapseError::encoder("GIF encoder is already closed"));
        };

        let rgba = DynamicImage::ImageRgb8(frame.clone()).into_rgba8();
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))?;

        self.frames += 1;
        debug!(frame = self.frames, "GIF frame written");
        Ok(())
    }

    fn frames_written(&self) -> usize {
        self.frames
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        // Dropping the encoder writes the GIF trailer.
        drop(self.encoder.take());
        info!(path = %self.cfg.out_path.display(), frames = self.frames, "GIF finalized");
        Ok(())
    }
}
