use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished still image.
pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> anyhow::Result<()>;

    /// File extension of the written images, without the dot.
    fn extension(&self) -> &'static str;
}
