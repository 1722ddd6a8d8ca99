use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ComplexRectError {
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for ComplexRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "complex rect size must be positive: {}x{}",
                    width, height
                )
            }
        }
    }
}

impl Error for ComplexRectError {}

/// The sampled region `[min.real, max.real] x [min.imag, max.imag]`.
///
/// The `min` corner maps to the first column and first row of a field, so
/// image row 0 is the smallest imaginary coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    min: Complex,
    max: Complex,
}

impl ComplexRect {
    pub fn new(min: Complex, max: Complex) -> Result<Self, ComplexRectError> {
        let width = max.real - min.real;
        let height = max.imag - min.imag;

        // written negated so that NaN extents are rejected too
        if !(width > 0.0 && height > 0.0) {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self { min, max })
    }

    pub fn from_center(center: Complex, width: f64, height: f64) -> Result<Self, ComplexRectError> {
        Self::new(
            Complex {
                real: center.real - 0.5 * width,
                imag: center.imag - 0.5 * height,
            },
            Complex {
                real: center.real + 0.5 * width,
                imag: center.imag + 0.5 * height,
            },
        )
    }

    #[must_use]
    pub fn min(&self) -> Complex {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Complex {
        self.max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.real - self.min.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.imag - self.min.imag
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex {
            real: (self.min.real + self.max.real) * 0.5,
            imag: (self.min.imag + self.max.imag) * 0.5,
        }
    }
}
