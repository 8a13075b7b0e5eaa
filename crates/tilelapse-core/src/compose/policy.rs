use image::{Rgb, Rgba};

use crate::consts::{DEFAULT_BORDER_COLOR, DEFAULT_FONT_SIZE, OVERLAY_MARGIN_BOTTOM};

/// Sub-rectangle of the canvas that holds real snapshot content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlacementBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Timestamp text rendering parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub enabled: bool,
    pub font_size: u32,
    pub text_color: Rgba<u8>,
    pub backdrop_color: Rgba<u8>,
    pub margin_bottom: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            font_size: DEFAULT_FONT_SIZE,
            text_color: Rgba([255, 255, 255, 230]),
            backdrop_color: Rgba([0, 0, 0, 160]),
            margin_bottom: OVERLAY_MARGIN_BOTTOM,
        }
    }
}

/// Everything needed to turn a snapshot into a frame. One policy is fixed
/// for the whole video, so every frame shares its canvas size.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionPolicy {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    /// Factor the canvas was derived with, if it came from a snapshot size.
    pub scale: Option<f64>,
    /// Zero disables the border.
    pub border_thickness: u32,
    pub border_color: Rgb<u8>,
    pub overlay: OverlayStyle,
}

impl CompositionPolicy {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Rgb([255, 255, 255]),
            scale: None,
            border_thickness: 0,
            border_color: Rgb(DEFAULT_BORDER_COLOR),
            overlay: OverlayStyle::default(),
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
