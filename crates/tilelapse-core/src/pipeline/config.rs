use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Days, FixedOffset, NaiveDateTime, Utc};
use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};

use crate::compose::{CompositionPolicy, OverlayStyle};
use crate::encode::VideoFormat;
use crate::consts::{
    DEFAULT_BORDER_COLOR, DEFAULT_CODEC, DEFAULT_FETCH_WORKERS, DEFAULT_FONT_SIZE, DEFAULT_FPS,
    DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SNAPSHOT_PREFIX, DEFAULT_TILE_SIZE,
    DEFAULT_URL_TEMPLATE, DEFAULT_USER_AGENT, LATEST_SNAPSHOT_NAME, LATEST_VIDEO_STEM,
    OVERLAY_MARGIN_BOTTOM,
};
use crate::error::{Result, TilelapseError};
use crate::mosaic::MosaicGrid;
use crate::source::{derive_canvas_size, Snapshot};

const SECONDS_PER_HOUR: i32 = 3600;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TilelapseConfig {
    /// Offset from UTC used for snapshot names and the default timelapse date.
    #[serde(default)]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub timelapse: TimelapseConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl TilelapseConfig {
    pub fn validate(&self) -> Result<()> {
        self.offset()?;
        self.capture.validate()?;
        self.timelapse.validate()
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                TilelapseError::config(format!(
                    "utc_offset_hours out of range: {}",
                    self.utc_offset_hours
                ))
            })
    }

    /// Wall-clock time in the configured offset.
    pub fn local_now(&self) -> Result<NaiveDateTime> {
        Ok(Utc::now().with_timezone(&self.offset()?).naive_local())
    }

    /// `YYYYMMDD` of the day before `now`; the usual timelapse target.
    pub fn previous_day_key(now: NaiveDateTime) -> String {
        now.date()
            .checked_sub_days(Days::new(1))
            .unwrap_or(now.date())
            .format("%Y%m%d")
            .to_string()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Tile URL with `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub user_agent: String,
    pub origin_x: u32,
    pub origin_y: u32,
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub max_retries: u32,
    pub request_timeout_secs: u64,
    pub workers: usize,
    /// Root of the `<YYYYMMDD>/` snapshot directories.
    pub output_dir: PathBuf,
    pub snapshot_prefix: String,
    /// Fill for cells whose tile is missing (RGBA).
    pub background: [u8; 4],
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin_x: 1506,
            origin_y: 631,
            columns: 3,
            rows: 3,
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            workers: DEFAULT_FETCH_WORKERS,
            output_dir: PathBuf::from("output"),
            snapshot_prefix: DEFAULT_SNAPSHOT_PREFIX.to_string(),
            background: [0, 0, 0, 0],
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.url_template.contains("{x}") || !self.url_template.contains("{y}") {
            return Err(TilelapseError::config(
                "url_template must contain {x} and {y} placeholders",
            ));
        }
        if self.snapshot_prefix.is_empty() {
            return Err(TilelapseError::config("snapshot_prefix must not be empty"));
        }
        self.grid().map(|_| ())
    }

    pub fn grid(&self) -> Result<MosaicGrid> {
        MosaicGrid::from_origin(
            self.origin_x,
            self.origin_y,
            self.columns,
            self.rows,
            self.tile_width,
            self.tile_height,
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn background(&self) -> Rgba<u8> {
        Rgba(self.background)
    }

    pub fn day_dir(&self, date_key: &str) -> PathBuf {
        self.output_dir.join(date_key)
    }

    pub fn latest_path(&self) -> PathBuf {
        self.output_dir.join(LATEST_SNAPSHOT_NAME)
    }
}

/// How the video canvas size is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasSizing {
    /// Most recent snapshot's size times `scale`.
    FromLatest { scale: f64 },
    Fixed { width: u32, height: u32 },
}

impl fmt::Display for CanvasSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromLatest { scale } => write!(f, "Latest snapshot x {scale}"),
            Self::Fixed { width, height } => write!(f, "Fixed {width}x{height}"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelapseConfig {
    pub fps: u32,
    pub codec: String,
    /// When set, the canvas is the latest snapshot's size times this factor
    /// and `width`/`height` are ignored. With neither set the factor is 1.
    pub scale: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: [u8; 3],
    pub border_thickness: u32,
    pub border_color: [u8; 3],
    pub timelapse_dir: PathBuf,
    pub overlay: OverlayConfig,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            codec: DEFAULT_CODEC.to_string(),
            scale: None,
            width: None,
            height: None,
            background: [255, 255, 255],
            border_thickness: 0,
            border_color: DEFAULT_BORDER_COLOR,
            timelapse_dir: PathBuf::from("timelapse"),
            overlay: OverlayConfig::default(),
        }
    }
}

impl TimelapseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(TilelapseError::config("fps must be non-zero"));
        }
        self.sizing().map(|_| ())
    }

    pub fn sizing(&self) -> Result<CanvasSizing> {
        match (self.scale, self.width, self.height) {
            (Some(scale), _, _) if scale.is_finite() && scale > 0.0 => {
                Ok(CanvasSizing::FromLatest { scale })
            }
            (Some(scale), _, _) => Err(TilelapseError::config(format!(
                "scale must be a positive number, got {scale}"
            ))),
            (None, Some(width), Some(height)) if width > 0 && height > 0 => {
                Ok(CanvasSizing::Fixed { width, height })
            }
            (None, None, None) => Ok(CanvasSizing::FromLatest { scale: 1.0 }),
            _ => Err(TilelapseError::config(
                "width and height must both be set and non-zero",
            )),
        }
    }

    /// Resolve the canvas size for a run over `snapshots`.
    pub fn canvas_size(&self, snapshots: &[Snapshot]) -> Result<(u32, u32)> {
        match self.sizing()? {
            CanvasSizing::FromLatest { scale } => derive_canvas_size(snapshots, scale),
            CanvasSizing::Fixed { width, height } => Ok((width, height)),
        }
    }

    pub fn policy(&self, width: u32, height: u32) -> CompositionPolicy {
        let scale = match self.sizing() {
            Ok(CanvasSizing::FromLatest { scale }) => Some(scale),
            _ => None,
        };
        CompositionPolicy {
            width,
            height,
            background: Rgb(self.background),
            scale,
            border_thickness: self.border_thickness,
            border_color: Rgb(self.border_color),
            overlay: self.overlay.style(),
        }
    }

    pub fn video_path(&self, date_key: &str) -> PathBuf {
        self.video_path_as(date_key, VideoFormat::Mp4)
    }

    pub fn video_path_as(&self, date_key: &str, format: VideoFormat) -> PathBuf {
        self.timelapse_dir
            .join(format!("timelapse_{date_key}.{}", format.extension()))
    }

    pub fn latest_path(&self) -> PathBuf {
        self.latest_path_as(VideoFormat::Mp4)
    }

    pub fn latest_path_as(&self, format: VideoFormat) -> PathBuf {
        self.timelapse_dir
            .join(format!("{LATEST_VIDEO_STEM}.{}", format.extension()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub font_size: u32,
    pub text_color: [u8; 4],
    pub backdrop_color: [u8; 4],
    pub margin_bottom: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_size: DEFAULT_FONT_SIZE,
            text_color: [255, 255, 255, 230],
            backdrop_color: [0, 0, 0, 160],
            margin_bottom: OVERLAY_MARGIN_BOTTOM,
        }
    }
}

impl OverlayConfig {
    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            enabled: self.enabled,
            font_size: self.font_size,
            text_color: Rgba(self.text_color),
            backdrop_color: Rgba(self.backdrop_color),
            margin_bottom: self.margin_bottom,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub enabled: bool,
    /// `{date}` is replaced with `YYYY-MM-DD`.
    pub caption_template: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            caption_template: "Timelapse {date}".to_string(),
        }
    }
}

impl DeliveryConfig {
    pub fn caption(&self, date_key: &str) -> String {
        let date = if date_key.len() == 8 && date_key.is_ascii() {
            format!("{}-{}-{}", &date_key[0..4], &date_key[4..6], &date_key[6..8])
        } else {
            date_key.to_string()
        };
        self.caption_template.replace("{date}", &date)
    }
}
