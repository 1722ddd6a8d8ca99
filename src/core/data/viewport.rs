use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    NonPositiveWidth { width: f64 },
    Region(ComplexRectError),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWidth { width } => {
                write!(f, "viewport width must be positive, got {}", width)
            }
            Self::Region(err) => write!(f, "invalid viewport region: {}", err),
        }
    }
}

impl Error for ViewportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Region(err) => Some(err),
            Self::NonPositiveWidth { .. } => None,
        }
    }
}

impl From<ComplexRectError> for ViewportError {
    fn from(err: ComplexRectError) -> Self {
        Self::Region(err)
    }
}

/// A centre and a width in the complex plane. The height is never stored,
/// it is derived from the output shape on every render.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Complex,
    width: f64,
}

impl Viewport {
    pub fn new(center: Complex, width: f64) -> Result<Self, ViewportError> {
        if !(width > 0.0) {
            return Err(ViewportError::NonPositiveWidth { width });
        }

        Ok(Self { center, width })
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height for square output pixels: `width * H / W`.
    #[must_use]
    pub fn image_height(&self, resolution: Resolution) -> f64 {
        self.width * f64::from(resolution.height()) / f64::from(resolution.width())
    }

    /// Height for terminal cells, which are about twice as tall as wide:
    /// `width * rows * 2 / cols`.
    #[must_use]
    pub fn cell_height(&self, cells: Resolution) -> f64 {
        self.width * f64::from(cells.height()) * 2.0 / f64::from(cells.width())
    }

    pub fn image_region(&self, resolution: Resolution) -> Result<ComplexRect, ViewportError> {
        Ok(ComplexRect::from_center(
            self.center,
            self.width,
            self.image_height(resolution),
        )?)
    }

    pub fn cell_region(&self, cells: Resolution) -> Result<ComplexRect, ViewportError> {
        Ok(ComplexRect::from_center(
            self.center,
            self.width,
            self.cell_height(cells),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_must_be_positive() {
        assert_eq!(
            Viewport::new(Complex::ZERO, 0.0),
            Err(ViewportError::NonPositiveWidth { width: 0.0 })
        );
        assert_eq!(
            Viewport::new(Complex::ZERO, -4.0),
            Err(ViewportError::NonPositiveWidth { width: -4.0 })
        );
        assert!(Viewport::new(Complex::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_image_region_keeps_square_pixels() {
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 4.0).unwrap();
        let resolution = Resolution::new(1920, 1080).unwrap();
        let region = viewport.image_region(resolution).unwrap();

        assert_eq!(region.width(), 4.0);
        assert!((region.height() - 2.25).abs() < 1e-12);
        assert_eq!(region.center(), Complex::new(-0.5, 0.0));
    }

    #[test]
    fn test_cell_region_doubles_height_for_terminal_cells() {
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 4.5).unwrap();
        let cells = Resolution::new(80, 40).unwrap();
        let region = viewport.cell_region(cells).unwrap();

        assert_eq!(region.width(), 4.5);
        assert!((region.height() - 4.5).abs() < 1e-12);
        assert_eq!(region.min(), Complex::new(-2.75, -2.25));
        assert_eq!(region.max(), Complex::new(1.75, 2.25));
    }
}
