/// Default tile server URL. `{x}` and `{y}` are replaced with tile coordinates.
pub const DEFAULT_URL_TEMPLATE: &str = "https://backend.wplace.live/files/s0/tiles/{x}/{y}.png";

/// User-Agent sent with every tile request.
pub const DEFAULT_USER_AGENT: &str = "Tilelapse/0.1";

/// Edge length (pixels) of one server tile.
pub const DEFAULT_TILE_SIZE: u32 = 1000;

/// Attempts per tile before it is marked absent.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Worker threads used for parallel tile fetches.
pub const DEFAULT_FETCH_WORKERS: usize = 4;

/// Base of the exponential backoff: delay = BASE^attempt seconds.
pub const BACKOFF_BASE_SECS: u64 = 2;

/// Upper bound on a single backoff exponent, keeps `2^n` from overflowing.
pub const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Filename prefix of persisted mosaics.
pub const DEFAULT_SNAPSHOT_PREFIX: &str = "merged_tiles";

/// Extension of persisted mosaics.
pub const SNAPSHOT_EXTENSION: &str = "png";

/// Filename of the "latest" mosaic copy inside the output directory.
pub const LATEST_SNAPSHOT_NAME: &str = "latest.png";

/// File stem of the "latest" video copy inside the timelapse directory.
pub const LATEST_VIDEO_STEM: &str = "latest";

/// Default output frame rate.
pub const DEFAULT_FPS: u32 = 10;

/// Default ffmpeg video codec.
pub const DEFAULT_CODEC: &str = "libx264";

/// NeuQuant speed for the GIF fallback (1 is slowest, 30 fastest).
pub const GIF_QUANTIZE_SPEED: i32 = 10;

/// Number of frames composed in parallel before being handed to the encoder.
/// At 3000x3000 RGB, 8 frames ~ 216 MB.
pub const COMPOSE_BATCH_SIZE: usize = 8;

/// Default timestamp font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 36;

/// Height of the built-in bitmap glyphs, in glyph cells.
pub const GLYPH_HEIGHT: u32 = 7;

/// Width of the built-in bitmap glyphs, in glyph cells.
pub const GLYPH_WIDTH: u32 = 5;

/// Horizontal padding between the timestamp text and its backdrop edge.
pub const OVERLAY_PADDING_X: u32 = 16;

/// Vertical padding between the timestamp text and its backdrop edge.
pub const OVERLAY_PADDING_Y: u32 = 12;

/// Gap between the overlay backdrop and the bottom edge of the canvas.
pub const OVERLAY_MARGIN_BOTTOM: u32 = 8;

/// Default border accent color (RGB).
pub const DEFAULT_BORDER_COLOR: [u8; 3] = [255, 64, 64];

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the Telegram chat id.
pub const TELEGRAM_CHAT_ENV: &str = "TELEGRAM_CHAT_ID";

/// Telegram Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
