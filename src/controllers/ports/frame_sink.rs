use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;

/// Receives animation frames strictly in ascending index order.
pub trait FrameSink {
    fn push_frame(&mut self, index: usize, frame: &PixelBuffer) -> anyhow::Result<()>;

    /// Flushes and closes the output. Frames pushed before a failed
    /// `finish` may be lost.
    fn finish(self: Box<Self>) -> anyhow::Result<()>;
}

/// Opens a [`FrameSink`] for one animation.
pub trait AnimationEncoderPort {
    fn open(&self, filepath: &Path, resolution: Resolution, fps: u32) -> anyhow::Result<Box<dyn FrameSink>>;

    /// File extension of the written animations, without the dot.
    fn extension(&self) -> &'static str;
}
