//! A tiny 5x7 bitmap face covering what timestamps and frame labels need.

use crate::consts::{GLYPH_HEIGHT, GLYPH_WIDTH};

type Glyph = [u8; GLYPH_HEIGHT as usize];

const BLANK: Glyph = [0; GLYPH_HEIGHT as usize];

// Rows top to bottom; bit 4 is the leftmost column.
fn glyph(c: char) -> &'static Glyph {
    match c {
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => &[0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'r' => &[0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        'a' => &[0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'm' => &[0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        'e' => &[0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        _ => &BLANK,
    }
}

/// Integer magnification of the 5x7 cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphScale(pub u32);

impl GlyphScale {
    /// Scale so the glyph height approximates `font_size` pixels.
    pub fn for_font_size(font_size: u32) -> Self {
        Self((font_size / GLYPH_HEIGHT).max(1))
    }

    fn advance(self) -> u32 {
        (GLYPH_WIDTH + 1) * self.0
    }
}

/// Pixel extent of `text` at `scale`, without trailing spacing.
pub fn text_size(text: &str, scale: GlyphScale) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return (0, 0);
    }
    (chars * scale.advance() - scale.0, GLYPH_HEIGHT * scale.0)
}

/// Visit every lit pixel of `text` laid out from `(0, 0)`.
pub(super) fn for_each_pixel(text: &str, scale: GlyphScale, mut f: impl FnMut(u32, u32)) {
    let s = scale.0;
    for (i, c) in text.chars().enumerate() {
        let origin_x = i as u32 * scale.advance();
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = origin_x + col * s;
                let py = row as u32 * s;
                for dy in 0..s {
                    for dx in 0..s {
                        f(px + dx, py + dy);
                    }
                }
            }
        }
    }
}
