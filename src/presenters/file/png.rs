use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, RgbImage};

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes frames as 8-bit RGB PNG files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngFilePresenter;

impl PngFilePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PngFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> anyhow::Result<()> {
        let resolution = buffer.resolution();
        let image = RgbImage::from_raw(resolution.width(), resolution.height(), buffer.buffer().clone())
            .with_context(|| format!("pixel buffer does not fill a {} image", resolution))?;

        image
            .save_with_format(filepath, ImageFormat::Png)
            .with_context(|| format!("failed to encode {}", filepath.display()))
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}
