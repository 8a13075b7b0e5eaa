mod common;

use common::{ffmpeg_tools_available, first_video_frame, gif_frames, inspect_video};
use image::{Rgb, RgbImage};
use tilelapse_core::encode::{
    ensure_parent_dir, rgb_to_bgr, EncodeConfig, FfmpegEncoder, GifSink, VideoFormat, VideoSink,
};

// ---------------------------------------------------------------------------
// Config validation
// ---------------------------------------------------------------------------

#[test]
fn test_encode_config_defaults() {
    let cfg = EncodeConfig::new("out.mp4", 640, 480, 10);
    assert_eq!(cfg.codec, "libx264");
    assert!(cfg.overwrite);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_encode_config_accepts_odd_dimensions() {
    let cfg = EncodeConfig::new("out.mp4", 101, 75, 10);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.output_size(), (102, 76));
    assert_eq!(EncodeConfig::new("out.mp4", 640, 480, 10).output_size(), (640, 480));
}

#[test]
fn test_encode_config_rejects_zero_fps_and_size() {
    assert!(EncodeConfig::new("out.mp4", 640, 480, 0).validate().is_err());
    assert!(EncodeConfig::new("out.mp4", 0, 480, 10).validate().is_err());
}

#[test]
fn test_encode_config_rejects_blank_codec() {
    let cfg = EncodeConfig::new("out.mp4", 640, 480, 10).with_codec("  ");
    assert!(cfg.validate().is_err());
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[test]
fn test_rgb_to_bgr_swaps_channels() {
    let src = [1u8, 2, 3, 4, 5, 6];
    let mut dst = [0u8; 6];
    rgb_to_bgr(&mut dst, &src);
    assert_eq!(dst, [3, 2, 1, 6, 5, 4]);
}

#[test]
fn test_ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("video.mp4");
    ensure_parent_dir(&path).unwrap();
    assert!(dir.path().join("a").join("b").is_dir());
}

#[test]
fn test_open_refuses_existing_file_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exists.mp4");
    std::fs::write(&path, b"keep me").unwrap();

    let mut cfg = EncodeConfig::new(&path, 16, 16, 10);
    cfg.overwrite = false;
    assert!(FfmpegEncoder::open(cfg).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn test_video_format_names() {
    assert_eq!(VideoFormat::Mp4.extension(), "mp4");
    assert_eq!(VideoFormat::Gif.extension(), "gif");
    assert_eq!(VideoFormat::Gif.to_string(), "Animated GIF");
}

// ---------------------------------------------------------------------------
// GIF fallback
// ---------------------------------------------------------------------------

#[test]
fn test_gif_sink_writes_every_frame_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clip.gif");
    let cfg = EncodeConfig::new(&path, 21, 15, 5);

    let mut sink: Box<dyn VideoSink> = Box::new(GifSink::open(cfg).unwrap());
    for color in [[255, 0, 0], [0, 255, 0], [0, 0, 255]] {
        sink.write_frame(&RgbImage::from_pixel(21, 15, Rgb(color))).unwrap();
    }
    assert_eq!(sink.frames_written(), 3);
    sink.close().unwrap();

    let frames = gif_frames(&path);
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (21, 15));

    let first = frames[0].buffer().get_pixel(10, 7);
    assert!(first[0] > 200 && first[1] < 60 && first[2] < 60, "{first:?}");
    let last = frames[2].buffer().get_pixel(10, 7);
    assert!(last[2] > 200 && last[0] < 60 && last[1] < 60, "{last:?}");

    let (numer, denom) = frames[0].delay().numer_denom_ms();
    assert_eq!(numer / denom, 200);
}

#[test]
fn test_gif_sink_rejects_mismatched_frame() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = EncodeConfig::new(dir.path().join("clip.gif"), 8, 8, 5);

    let mut sink = GifSink::open(cfg).unwrap();
    assert!(sink.write_frame(&RgbImage::new(4, 4)).is_err());
    assert_eq!(sink.frames_written(), 0);
}

#[test]
fn test_gif_sink_refuses_existing_file_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exists.gif");
    std::fs::write(&path, b"keep me").unwrap();

    let mut cfg = EncodeConfig::new(&path, 8, 8, 5);
    cfg.overwrite = false;
    assert!(GifSink::open(cfg).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn test_video_format_opens_gif_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.gif");
    let mut sink = VideoFormat::Gif
        .open(EncodeConfig::new(&path, 4, 4, 10))
        .unwrap();
    sink.write_frame(&RgbImage::new(4, 4)).unwrap();
    sink.close().unwrap();
    assert_eq!(gif_frames(&path).len(), 1);
}

// ---------------------------------------------------------------------------
// End-to-end (needs ffmpeg + ffprobe)
// ---------------------------------------------------------------------------

#[test]
fn test_ffmpeg_encoder_writes_every_frame() {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clip.mp4");
    let cfg = EncodeConfig::new(&path, 32, 24, 5).with_codec("mpeg4");

    let mut enc: Box<dyn VideoSink> = Box::new(FfmpegEncoder::open(cfg).unwrap());
    for i in 0..4u8 {
        let frame = RgbImage::from_pixel(32, 24, Rgb([i * 60, 0, 255 - i * 60]));
        enc.write_frame(&frame).unwrap();
    }
    assert_eq!(enc.frames_written(), 4);
    enc.close().unwrap();

    let info = inspect_video(&path);
    assert_eq!((info.width, info.height, info.frames), (32, 24, 4));
}

#[test]
fn test_ffmpeg_encoder_rejects_mismatched_frame() {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let cfg = EncodeConfig::new(dir.path().join("clip.mp4"), 32, 24, 5).with_codec("mpeg4");

    let mut enc = FfmpegEncoder::open(cfg).unwrap();
    assert!(enc.write_frame(&RgbImage::new(16, 16)).is_err());
    assert_eq!(enc.frames_written(), 0);
}

#[test]
fn test_ffmpeg_encoder_pads_odd_frames() {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.mp4");
    let cfg = EncodeConfig::new(&path, 33, 25, 5).with_codec("mpeg4");

    let mut enc: Box<dyn VideoSink> = Box::new(FfmpegEncoder::open(cfg).unwrap());
    for _ in 0..2 {
        enc.write_frame(&RgbImage::from_pixel(33, 25, Rgb([255, 0, 0])))
            .unwrap();
    }
    enc.close().unwrap();

    let info = inspect_video(&path);
    assert_eq!((info.width, info.height, info.frames), (34, 26, 2));
}

#[test]
fn test_ffmpeg_encoder_keeps_channel_order() {
    if !ffmpeg_tools_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("red.mp4");
    let cfg = EncodeConfig::new(&path, 32, 32, 5).with_codec("mpeg4");

    let mut enc: Box<dyn VideoSink> = Box::new(FfmpegEncoder::open(cfg).unwrap());
    enc.write_frame(&RgbImage::from_pixel(32, 32, Rgb([220, 20, 20])))
        .unwrap();
    enc.close().unwrap();

    let frame = first_video_frame(&path);
    let px = frame.get_pixel(16, 16);
    assert!(px[0] > 150 && px[2] < 100, "expected red, got {px:?}");
}
