use std::fmt;

use image::imageops::FilterType;

/// How a snapshot is brought to its on-canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResampleMode {
    /// Source already matches the canvas; pixels are copied untouched.
    Passthrough,
    /// Uniform integer up- or downscale; keeps tile edges crisp.
    Nearest,
    /// Any other ratio.
    Lanczos,
}

impl ResampleMode {
    pub fn filter(self) -> Option<FilterType> {
        match self {
            Self::Passthrough => None,
            Self::Nearest => Some(FilterType::Nearest),
            Self::Lanczos => Some(FilterType::Lanczos3),
        }
    }
}

impl fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough => write!(f, "Passthrough"),
            Self::Nearest => write!(f, "Nearest"),
            Self::Lanczos => write!(f, "Lanczos"),
        }
    }
}

/// Largest aspect-preserving size of `src` that fits inside `target`.
///
/// Uses integer arithmetic: the limiting axis gets exactly the target
/// extent, the other axis is floored. Neither side drops below one pixel.
pub fn fit_size(src: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (u64::from(src.0.max(1)), u64::from(src.1.max(1)));
    let (tw, th) = (u64::from(target.0), u64::from(target.1));

    // tw/sw <= th/sh  <=>  tw*sh <= th*sw
    let (w, h) = if tw * sh <= th * sw {
        (tw, sh * tw / sw)
    } else {
        (sw * th / sh, th)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

/// Pick the resample mode for drawing `src` onto a `target` canvas, along
/// with the size the source is resampled to.
pub fn select_resample(src: (u32, u32), target: (u32, u32)) -> (ResampleMode, (u32, u32)) {
    if src == target {
        return (ResampleMode::Passthrough, target);
    }

    let size = fit_size(src, target);
    let mode = if is_uniform_integer_ratio(src, size) || is_uniform_integer_ratio(size, src) {
        ResampleMode::Nearest
    } else {
        ResampleMode::Lanczos
    };
    (mode, size)
}

/// True when `large` is exactly `small * k` on both axes for one integer `k`.
fn is_uniform_integer_ratio(small: (u32, u32), large: (u32, u32)) -> bool {
    let (sw, sh) = small;
    let (lw, lh) = large;
    if sw == 0 || sh == 0 || lw < sw || lh < sh {
        return false;
    }
    lw % sw == 0 && lh % sh == 0 && lw / sw == lh / sh
}
