//! Frame composition: fit a snapshot onto the video canvas, then annotate it.

mod blend;
mod border;
mod compositor;
mod font;
mod overlay;
mod policy;
mod resample;

pub use border::draw_border;
pub use compositor::{compose, compose_snapshot, ComposedFrame};
pub use font::{text_size, GlyphScale};
pub use overlay::draw_timestamp;
pub use policy::{CompositionPolicy, OverlayStyle, PlacementBox};
pub use resample::{fit_size, select_resample, ResampleMode};
