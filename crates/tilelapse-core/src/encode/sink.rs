use image::RgbImage;

use crate::error::Result;

/// An open video stream that accepts frames strictly in order.
pub trait VideoSink {
    /// Append one frame. Its size must match the session size.
    fn write_frame(&mut self, frame: &RgbImage) -> Result<()>;

    fn frames_written(&self) -> usize;

    /// Flush and release the stream. Consumes the sink so it runs once.
    fn close(self: Box<Self>) -> Result<()>;
}
