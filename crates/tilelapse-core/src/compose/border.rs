use image::{Rgb, RgbImage};

use super::policy::PlacementBox;

/// Trace `placement` with `thickness` concentric one-pixel rectangles,
/// inset 0..thickness-1 from its edges. Rings that would collapse are skipped.
pub fn draw_border(canvas: &mut RgbImage, placement: PlacementBox, thickness: u32, color: Rgb<u8>) {
    if placement.width == 0 || placement.height == 0 {
        return;
    }

    let right = placement.x + placement.width - 1;
    let bottom = placement.y + placement.height - 1;

    for inset in 0..thickness {
        let left = placement.x + inset;
        let top = placement.y + inset;
        if inset > right || inset > bottom {
            break;
        }
        let (r, b) = (right - inset, bottom - inset);
        if left > r || top > b {
            break;
        }

        for x in left..=r {
            put(canvas, x, top, color);
            put(canvas, x, b, color);
        }
        for y in top..=b {
            put(canvas, left, y, color);
            put(canvas, r, y, color);
        }
    }
}

fn put(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}
