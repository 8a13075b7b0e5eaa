mod common;

use common::write_snapshot;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use tilelapse_core::compose::{
    compose, compose_snapshot, draw_border, draw_timestamp, fit_size, select_resample, text_size,
    CompositionPolicy, GlyphScale, OverlayStyle, PlacementBox, ResampleMode,
};
use tilelapse_core::source::Snapshot;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

fn plain_policy(width: u32, height: u32) -> CompositionPolicy {
    let mut policy = CompositionPolicy::new(width, height);
    policy.overlay.enabled = false;
    policy
}

// ---------------------------------------------------------------------------
// Fit and resample selection
// ---------------------------------------------------------------------------

#[test]
fn test_fit_size_width_limited() {
    assert_eq!(fit_size((100, 50), (200, 200)), (200, 100));
}

#[test]
fn test_fit_size_height_limited() {
    assert_eq!(fit_size((1000, 1000), (1920, 1080)), (1080, 1080));
}

#[test]
fn test_fit_size_never_zero() {
    assert_eq!(fit_size((1000, 1), (10, 10)), (10, 1));
}

#[test]
fn test_equal_size_is_passthrough() {
    assert_eq!(
        select_resample((640, 480), (640, 480)),
        (ResampleMode::Passthrough, (640, 480))
    );
}

#[test]
fn test_integer_upscale_is_nearest() {
    assert_eq!(
        select_resample((100, 50), (200, 200)),
        (ResampleMode::Nearest, (200, 100))
    );
}

#[test]
fn test_integer_downscale_is_nearest() {
    assert_eq!(
        select_resample((3000, 3000), (1000, 1000)),
        (ResampleMode::Nearest, (1000, 1000))
    );
}

#[test]
fn test_fractional_ratio_is_lanczos() {
    assert_eq!(
        select_resample((1000, 1000), (1920, 1080)),
        (ResampleMode::Lanczos, (1080, 1080))
    );
}

#[test]
fn test_resample_mode_display() {
    assert_eq!(ResampleMode::Nearest.to_string(), "Nearest");
    assert!(ResampleMode::Passthrough.filter().is_none());
}

// ---------------------------------------------------------------------------
// Compose
// ---------------------------------------------------------------------------

#[test]
fn test_compose_letterboxes_and_centers() {
    let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, RED));
    let out = compose(&src, &plain_policy(20, 30)).unwrap();

    assert_eq!(out.frame.dimensions(), (20, 30));
    assert_eq!(out.placement, PlacementBox::new(0, 5, 20, 20));
    assert_eq!(out.mode, ResampleMode::Nearest);
    assert_eq!(*out.frame.get_pixel(0, 0), WHITE);
    assert_eq!(*out.frame.get_pixel(0, 5), RED);
    assert_eq!(*out.frame.get_pixel(19, 24), RED);
    assert_eq!(*out.frame.get_pixel(0, 25), WHITE);
}

#[test]
fn test_compose_double_size_fills_canvas() {
    let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, RED));
    let out = compose(&src, &plain_policy(12, 8)).unwrap();
    assert_eq!(out.mode, ResampleMode::Nearest);
    assert_eq!(out.placement, PlacementBox::new(0, 0, 12, 8));
    assert!(out.frame.pixels().all(|p| *p == RED));
}

#[test]
fn test_compose_passthrough_copies_pixels() {
    let mut img = RgbImage::from_pixel(4, 4, BLACK);
    img.put_pixel(1, 2, Rgb([10, 20, 30]));
    let out = compose(&DynamicImage::ImageRgb8(img.clone()), &plain_policy(4, 4)).unwrap();
    assert_eq!(out.mode, ResampleMode::Passthrough);
    assert_eq!(out.frame, img);
}

#[test]
fn test_compose_blends_transparency_over_background() {
    let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 128]));
    let mut policy = plain_policy(2, 1);
    policy.background = BLACK;

    let out = compose(&DynamicImage::ImageRgba8(img), &policy).unwrap();
    assert_eq!(*out.frame.get_pixel(0, 0), BLACK);
    assert_eq!(*out.frame.get_pixel(1, 0), Rgb([128, 128, 128]));
}

#[test]
fn test_compose_rejects_empty_canvas() {
    let src = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
    assert!(compose(&src, &plain_policy(0, 4)).is_err());
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

#[test]
fn test_border_draws_concentric_rings_inside_placement() {
    let mut canvas = RgbImage::from_pixel(10, 10, BLACK);
    draw_border(&mut canvas, PlacementBox::new(2, 2, 6, 6), 2, RED);

    assert_eq!(*canvas.get_pixel(2, 2), RED);
    assert_eq!(*canvas.get_pixel(7, 7), RED);
    assert_eq!(*canvas.get_pixel(3, 3), RED);
    assert_eq!(*canvas.get_pixel(6, 4), RED);
    assert_eq!(*canvas.get_pixel(4, 4), BLACK);
    assert_eq!(*canvas.get_pixel(1, 1), BLACK);
    assert_eq!(*canvas.get_pixel(8, 8), BLACK);
}

#[test]
fn test_border_thicker_than_box_fills_it() {
    let mut canvas = RgbImage::from_pixel(4, 4, BLACK);
    draw_border(&mut canvas, PlacementBox::new(0, 0, 4, 4), 10, RED);
    assert!(canvas.pixels().all(|p| *p == RED));
}

// ---------------------------------------------------------------------------
// Timestamp overlay
// ---------------------------------------------------------------------------

#[test]
fn test_glyph_scale_and_text_size() {
    assert_eq!(GlyphScale::for_font_size(36), GlyphScale(5));
    assert_eq!(GlyphScale::for_font_size(3), GlyphScale(1));
    assert_eq!(text_size("Frame 1", GlyphScale(1)), (41, 7));
    assert_eq!(text_size("", GlyphScale(3)), (0, 0));
}

#[test]
fn test_overlay_darkens_bottom_center_only() {
    let mut canvas = RgbImage::from_pixel(400, 100, WHITE);
    let drawn = draw_timestamp(&mut canvas, "12:00", &OverlayStyle::default());
    assert!(drawn);

    // Backdrop: 177x59 box, 8px above the bottom edge.
    assert_eq!(*canvas.get_pixel(111, 33), Rgb([95, 95, 95]));
    assert_eq!(*canvas.get_pixel(110, 33), WHITE);
    assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    assert_eq!(*canvas.get_pixel(200, 99), WHITE);
}

#[test]
fn test_overlay_disabled_or_too_large_draws_nothing() {
    let mut canvas = RgbImage::from_pixel(50, 50, WHITE);
    let before = canvas.clone();

    let disabled = OverlayStyle {
        enabled: false,
        ..OverlayStyle::default()
    };
    assert!(!draw_timestamp(&mut canvas, "12:00", &disabled));
    assert!(!draw_timestamp(&mut canvas, "2025-01-01 00:00:00", &OverlayStyle::default()));
    assert_eq!(canvas, before);
}

// ---------------------------------------------------------------------------
// Snapshot to frame
// ---------------------------------------------------------------------------

#[test]
fn test_compose_snapshot_draws_border_over_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), "m", "20250101", "000000", (10, 10), [0, 200, 0]);
    let mut policy = plain_policy(20, 20);
    policy.border_thickness = 1;
    policy.border_color = RED;

    let out = compose_snapshot(&Snapshot::from_path(path), 1, &policy).unwrap();
    assert_eq!(out.placement, PlacementBox::new(0, 0, 20, 20));
    assert_eq!(*out.frame.get_pixel(0, 0), RED);
    assert_eq!(*out.frame.get_pixel(19, 10), RED);
    assert_eq!(*out.frame.get_pixel(10, 10), Rgb([0, 200, 0]));
}

#[test]
fn test_compose_snapshot_labels_frame() {
    let dir = tempfile::tempdir().unwrap();
    let color = [200, 200, 200];
    let path = write_snapshot(dir.path(), "m", "20250101", "000000", (30, 20), color);
    let mut policy = CompositionPolicy::new(300, 200);
    policy.overlay.font_size = 14;

    let out = compose_snapshot(&Snapshot::from_path(path), 1, &policy).unwrap();
    assert_eq!(out.mode, ResampleMode::Nearest);
    assert_eq!(*out.frame.get_pixel(0, 0), Rgb(color));
    assert_ne!(*out.frame.get_pixel(21, 154), Rgb(color));
}

#[test]
fn test_compose_snapshot_unreadable_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m_20250101_000000.png");
    std::fs::write(&path, b"nope").unwrap();
    assert!(compose_snapshot(&Snapshot::from_path(path), 1, &plain_policy(8, 8)).is_err());
}
