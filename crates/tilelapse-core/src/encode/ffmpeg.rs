use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::consts::DEFAULT_CODEC;
use crate::error::{Result, TilelapseError};

use super::sink::VideoSink;

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: String,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>, width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            codec: DEFAULT_CODEC.to_string(),
            out_path: out_path.into(),
            overwrite: true,
        }
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TilelapseError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(TilelapseError::config("encode fps must be non-zero"));
        }
        if self.codec.trim().is_empty() {
            return Err(TilelapseError::config("encode codec must not be empty"));
        }
        Ok(())
    }

    fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Size of the encoded picture: yuv420p needs even extents, so odd
    /// frames gain one padding row or column.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width + self.width % 2, self.height + self.height % 2)
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Swap packed RGB triples into BGR order.
pub fn rgb_to_bgr(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

/// Streams raw `bgr24` frames into the system `ffmpeg` binary.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    frames: usize,
}

impl FfmpegEncoder {
    pub fn open(cfg: EncodeConfig) -> Result<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(TilelapseError::encoder(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(TilelapseError::encoder(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "bgr24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            &cfg.codec,
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| TilelapseError::encoder(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TilelapseError::encoder("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TilelapseError::encoder("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        info!(
            path = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            codec = %cfg.codec,
            "Opened video stream"
        );

        Ok(Self {
            scratch: vec![0u8; cfg.frame_bytes()],
            cfg,
            child: Some(child),
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            frames: 0,
        })
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.cfg
    }
}

impl VideoSink for FfmpegEncoder {
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

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TilelapseError::encoder("ffmpeg encoder is already closed"));
        };

        rgb_to_bgr(&mut self.scratch, frame.as_raw());
        stdin
            .write_all(&self.scratch)
            .map_err(|e| TilelapseError::encoder(format!("failed to write frame to ffmpeg: {e}")))?;

        self.frames += 1;
        debug!(frame = self.frames, "Frame written");
        Ok(())
    }

    fn frames_written(&self) -> usize {
        self.frames
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        drop(self.stdin.take());

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| TilelapseError::encoder(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TilelapseError::encoder("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TilelapseError::encoder(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TilelapseError::encoder(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }

        info!(path = %self.cfg.out_path.display(), frames = self.frames, "Video finalized");
        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.wait() {
                warn!(error = %e, "Failed to reap ffmpeg process");
            }
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}
