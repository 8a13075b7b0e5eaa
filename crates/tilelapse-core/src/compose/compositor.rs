use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel, RgbImage};
use tracing::debug;

use crate::error::{Result, TilelapseError};
use crate::source::Snapshot;

use super::blend::blend_image;
use super::border::draw_border;
use super::overlay::draw_timestamp;
use super::policy::{CompositionPolicy, PlacementBox};
use super::resample::{select_resample, ResampleMode};

/// A canvas-sized, fully opaque frame and where its content sits.
#[derive(Clone, Debug)]
pub struct ComposedFrame {
    pub frame: RgbImage,
    pub placement: PlacementBox,
    pub mode: ResampleMode,
}

/// Fit `image` onto the policy canvas: resample, center, matte.
///
/// Sources that already match the canvas are copied without resampling.
/// Transparent sources are alpha-blended over the background; opaque ones
/// are pasted directly.
pub fn compose(image: &DynamicImage, policy: &CompositionPolicy) -> Result<ComposedFrame> {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(TilelapseError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }
    if policy.width == 0 || policy.height == 0 {
        return Err(TilelapseError::InvalidDimensions {
            width: policy.width,
            height: policy.height,
        });
    }

    let (mode, (new_w, new_h)) = select_resample((src_w, src_h), policy.canvas_size());
    let x = (policy.width - new_w) / 2;
    let y = (policy.height - new_h) / 2;

    let mut frame = RgbImage::from_pixel(policy.width, policy.height, policy.background);
    if image.color().has_alpha() {
        let placed = resample(image.to_rgba8(), mode, new_w, new_h);
        blend_image(&mut frame, &placed, x, y);
    } else {
        let placed = resample(image.to_rgb8(), mode, new_w, new_h);
        imageops::replace(&mut frame, &placed, i64::from(x), i64::from(y));
    }

    Ok(ComposedFrame {
        frame,
        placement: PlacementBox::new(x, y, new_w, new_h),
        mode,
    })
}

fn resample<P>(src: ImageBuffer<P, Vec<u8>>, mode: ResampleMode, w: u32, h: u32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    match mode.filter() {
        Some(filter) => imageops::resize(&src, w, h, filter),
        None => src,
    }
}

/// Load a snapshot and turn it into a finished frame: composed, bordered
/// and labelled. `position` is the 1-based index used for `Frame N` labels.
pub fn compose_snapshot(
    snapshot: &Snapshot,
    position: usize,
    policy: &CompositionPolicy,
) -> Result<ComposedFrame> {
    let image = image::open(&snapshot.path)?;
    let mut composed = compose(&image, policy)?;

    if policy.border_thickness > 0 {
        draw_border(
            &mut composed.frame,
            composed.placement,
            policy.border_thickness,
            policy.border_color,
        );
    }

    let label = snapshot.label(position);
    draw_timestamp(&mut composed.frame, &label, &policy.overlay);

    debug!(
        file = %snapshot.file_name,
        mode = %composed.mode,
        x = composed.placement.x,
        y = composed.placement.y,
        width = composed.placement.width,
        height = composed.placement.height,
        "Composed frame"
    );
    Ok(composed)
}
