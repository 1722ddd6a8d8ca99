use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ResizeError {
    FieldShapeMismatch { resolution: Resolution, buffer_size: usize },
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for ResizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldShapeMismatch {
                resolution,
                buffer_size,
            } => {
                write!(
                    f,
                    "{} bytes do not form a {} RGB image",
                    buffer_size, resolution
                )
            }
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for ResizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PixelBuffer(err) => Some(err),
            Self::FieldShapeMismatch { .. } => None,
        }
    }
}

/// Resamples `buffer` to `output` with a Lanczos3 filter. A buffer that is
/// already the right size is returned untouched.
pub fn resize_pixel_buffer(buffer: PixelBuffer, output: Resolution) -> Result<PixelBuffer, ResizeError> {
    let source = buffer.resolution();

    if source == output {
        return Ok(buffer);
    }

    let buffer_size = buffer.buffer_size();
    let image = RgbImage::from_raw(source.width(), source.height(), buffer.into_data()).ok_or(
        ResizeError::FieldShapeMismatch {
            resolution: source,
            buffer_size,
        },
    )?;

    let resized = imageops::resize(&image, output.width(), output.height(), FilterType::Lanczos3);

    PixelBuffer::from_data(output, resized.into_raw()).map_err(ResizeError::PixelBuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    fn solid(width: u32, height: u32, colour: Colour) -> PixelBuffer {
        let resolution = Resolution::new(width, height).unwrap();
        let data = (0..resolution.pixel_count())
            .flat_map(|_| [colour.r, colour.g, colour.b])
            .collect();

        PixelBuffer::from_data(resolution, data).unwrap()
    }

    #[test]
    fn test_same_size_is_returned_as_is() {
        let buffer = solid(4, 3, Colour::gray(80));
        let resized = resize_pixel_buffer(buffer.clone(), Resolution::new(4, 3).unwrap()).unwrap();

        assert_eq!(resized, buffer);
    }

    #[test]
    fn test_downsampling_changes_shape() {
        let buffer = solid(8, 6, Colour::gray(200));
        let output = Resolution::new(4, 3).unwrap();
        let resized = resize_pixel_buffer(buffer, output).unwrap();

        assert_eq!(resized.resolution(), output);
        assert_eq!(resized.buffer_size(), 4 * 3 * 3);
    }

    #[test]
    fn test_solid_colour_survives_resampling() {
        let colour = Colour {
            r: 10,
            g: 120,
            b: 250,
        };
        let resized = resize_pixel_buffer(solid(6, 6, colour), Resolution::new(3, 3).unwrap()).unwrap();

        for y in 0..3 {
            for x in 0..3 {
                let pixel = resized.pixel(x, y).unwrap();
                assert!(pixel.r.abs_diff(colour.r) <= 1);
                assert!(pixel.g.abs_diff(colour.g) <= 1);
                assert!(pixel.b.abs_diff(colour.b) <= 1);
            }
        }
    }
}
