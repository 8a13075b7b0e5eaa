use image::RgbImage;
use tracing::debug;

use crate::consts::{OVERLAY_PADDING_X, OVERLAY_PADDING_Y};

use super::blend::{blend_over, fill_rect};
use super::font::{for_each_pixel, text_size, GlyphScale};
use super::policy::OverlayStyle;

/// Draw `text` centered horizontally near the bottom of the whole canvas,
/// over a translucent backdrop. The canvas stays opaque.
///
/// Returns `false` when the text does not fit and nothing was drawn.
pub fn draw_timestamp(canvas: &mut RgbImage, text: &str, style: &OverlayStyle) -> bool {
    if !style.enabled || text.is_empty() {
        return false;
    }

    let scale = GlyphScale::for_font_size(style.font_size);
    let (text_w, text_h) = text_size(text, scale);
    let box_w = text_w + 2 * OVERLAY_PADDING_X;
    let box_h = text_h + 2 * OVERLAY_PADDING_Y;

    let (canvas_w, canvas_h) = canvas.dimensions();
    if box_w > canvas_w || box_h + style.margin_bottom > canvas_h {
        debug!(text, canvas_w, canvas_h, "Canvas too small for timestamp overlay");
        return false;
    }

    let box_x = (canvas_w - box_w) / 2;
    let box_y = canvas_h - box_h - style.margin_bottom;
    fill_rect(canvas, box_x, box_y, box_w, box_h, style.backdrop_color);

    let text_x = box_x + OVERLAY_PADDING_X;
    let text_y = box_y + OVERLAY_PADDING_Y;
    for_each_pixel(text, scale, |x, y| {
        blend_over(canvas.get_pixel_mut(text_x + x, text_y + y), style.text_color);
    });

    true
}
