use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Source-over with straight alpha onto an opaque pixel.
pub(super) fn blend_over(dst: &mut Rgb<u8>, src: Rgba<u8>) {
    let a = u16::from(src[3]);
    if a == 255 {
        *dst = Rgb([src[0], src[1], src[2]]);
        return;
    }
    if a == 0 {
        return;
    }

    let inv = 255 - a;
    for c in 0..3 {
        let v = mul_div255(u16::from(src[c]), a) + mul_div255(u16::from(dst[c]), inv);
        dst[c] = v.min(255) as u8;
    }
}

/// Alpha-composite `src` onto `canvas` with its top-left at `(x, y)`, clipped.
pub(super) fn blend_image(canvas: &mut RgbImage, src: &RgbaImage, x: u32, y: u32) {
    let w = src.width().min(canvas.width().saturating_sub(x));
    let h = src.height().min(canvas.height().saturating_sub(y));
    for sy in 0..h {
        for sx in 0..w {
            blend_over(canvas.get_pixel_mut(x + sx, y + sy), *src.get_pixel(sx, sy));
        }
    }
}

/// Blend a solid rectangle, clipped to the canvas.
pub(super) fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(w).min(canvas.width());
    let y_end = y.saturating_add(h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            blend_over(canvas.get_pixel_mut(px, py), color);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}
