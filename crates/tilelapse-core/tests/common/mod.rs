#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tilelapse_core::encode::VideoSink;
use tilelapse_core::error::{Result, TilelapseError};
use tilelapse_core::fetch::{HttpClient, Sleeper};

/// Encode a solid RGBA image as PNG bytes.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Write a solid RGB PNG to `path`, creating parent directories.
pub fn write_rgb_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Write a snapshot named `<prefix>_<date>_<time>.png` under `<root>/<date>/`.
pub fn write_snapshot(
    root: &Path,
    prefix: &str,
    date: &str,
    time: &str,
    size: (u32, u32),
    color: [u8; 3],
) -> PathBuf {
    let path = root.join(date).join(format!("{prefix}_{date}_{time}.png"));
    write_rgb_png(&path, size.0, size.1, color);
    path
}

/// Serves bodies by URL; unknown URLs fail. Counts every request.
#[derive(Default)]
pub struct MapClient {
    pub bodies: HashMap<String, Vec<u8>>,
    pub requests: Mutex<Vec<String>>,
}

impl MapClient {
    pub fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

impl HttpClient for MapClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| TilelapseError::Http(format!("HTTP 404 Not Found from {url}")))
    }
}

/// Fails the first `failures` requests, then returns `body`.
pub struct FlakyClient {
    failures: usize,
    body: Vec<u8>,
    calls: AtomicUsize,
}

impl FlakyClient {
    pub fn new(failures: usize, body: Vec<u8>) -> Self {
        Self {
            failures,
            body,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpClient for FlakyClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(TilelapseError::Http(format!("HTTP 500 from {url}")))
        } else {
            Ok(self.body.clone())
        }
    }
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

/// What a [`MemorySink`] saw, shared with the test after the sink is consumed.
#[derive(Default)]
pub struct SinkLog {
    pub frames: Vec<RgbImage>,
    pub closes: usize,
}

/// In-memory video sink. On close it writes a placeholder file to `out_path`
/// (when set) so latest-copy handling can be observed.
pub struct MemorySink {
    pub log: Arc<Mutex<SinkLog>>,
    pub out_path: Option<PathBuf>,
    pub fail_on_frame: Option<usize>,
    pub fail_on_close: bool,
    written: usize,
}

impl MemorySink {
    pub fn new(log: Arc<Mutex<SinkLog>>) -> Self {
        Self {
            log,
            out_path: None,
            fail_on_frame: None,
            fail_on_close: false,
            written: 0,
        }
    }

    pub fn writing_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_path = Some(path.into());
        self
    }

    pub fn failing_on(mut self, frame: usize) -> Self {
        self.fail_on_frame = Some(frame);
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }
}

impl VideoSink for MemorySink {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if self.fail_on_frame == Some(self.written) {
            return Err(TilelapseError::encoder("broken pipe"));
        }
        self.log.lock().unwrap().frames.push(frame.clone());
        self.written += 1;
        Ok(())
    }

    fn frames_written(&self) -> usize {
        self.written
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.log.lock().unwrap().closes += 1;
        if self.fail_on_close {
            return Err(TilelapseError::encoder("close failed"));
        }
        if let Some(path) = &self.out_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{} frames", self.written))?;
        }
        Ok(())
    }
}

pub fn ffmpeg_tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|bin| {
        std::process::Command::new(bin)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub duration: f64,
}

/// Inspect the first video stream via ffprobe.
pub fn inspect_video(path: &Path) -> VideoInfo {
    let output = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-count_frames",
            "-show_entries",
            "stream=width,height,nb_read_frames,duration",
            "-of",
            "default=noprint_wrappers=1",
        ])
        .arg(path)
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&output.stdout);
    let fields: HashMap<&str, &str> = text
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect();
    VideoInfo {
        width: fields["width"].parse().unwrap(),
        height: fields["height"].parse().unwrap(),
        frames: fields["nb_read_frames"].parse().unwrap(),
        duration: fields["duration"].parse().unwrap(),
    }
}

/// Decode the first frame of a video into RGB via ffmpeg.
pub fn first_video_frame(path: &Path) -> RgbImage {
    let png = path.with_extension("first.png");
    let status = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-i"])
        .arg(path)
        .args(["-frames:v", "1"])
        .arg(&png)
        .status()
        .unwrap();
    assert!(status.success());
    image::open(&png).unwrap().to_rgb8()
}

/// Every frame of an animated GIF, decoded.
pub fn gif_frames(path: &Path) -> Vec<image::Frame> {
    use image::AnimationDecoder;
    let reader = std::io::BufReader::new(std::fs::File::open(path).unwrap());
    image::codecs::gif::GifDecoder::new(reader)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}
