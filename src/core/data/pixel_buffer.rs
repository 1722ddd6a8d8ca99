use crate::core::data::colour::Colour;
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

fn resolution_to_buffer_size(resolution: Resolution) -> usize {
    resolution.pixel_count() * 3
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        x: u32,
        y: u32,
        resolution: Resolution,
    },
    BoundsMismatch {
        resolution_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                resolution_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "resolution size {} does not match buffer size {}",
                    resolution_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { x, y, resolution } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {} buffer",
                    x, y, resolution
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB24 pixels, row by row from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    resolution: Resolution,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            buffer: vec![0; resolution_to_buffer_size(resolution)],
        }
    }

    pub fn from_data(
        resolution: Resolution,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let resolution_size = resolution_to_buffer_size(resolution);

        if resolution_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                resolution_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { resolution, buffer })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if !self.resolution.contains(x, y) {
            return None;
        }

        let index = self.index_of(x, y);

        Some(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        if !self.resolution.contains(x, y) {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                resolution: self.resolution,
            });
        }

        let index = self.index_of(x, y);

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    /// Iterates over the pixels of one row, left to right.
    pub fn row(&self, y: u32) -> impl Iterator<Item = Colour> + '_ {
        let row_bytes = self.resolution.width() as usize * 3;
        let start = (y as usize * row_bytes).min(self.buffer.len());
        let end = (start + row_bytes).min(self.buffer.len());

        self.buffer[start..end].chunks_exact(3).map(|rgb| Colour {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        })
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.resolution.width() as usize + x as usize) * 3
    }
}
