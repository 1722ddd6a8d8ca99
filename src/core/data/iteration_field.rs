use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationFieldError {
    ShapeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for IterationFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "iteration field expects {} cells, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl Error for IterationFieldError {}

/// Escape counts for a grid of samples, stored row by row.
///
/// Cell `(x, y)` is the sample at column `x` of row `y`. Row 0 holds the
/// smallest imaginary coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationField {
    resolution: Resolution,
    cells: Vec<u16>,
}

impl IterationField {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            cells: vec![0; resolution.pixel_count()],
        }
    }

    pub fn from_cells(resolution: Resolution, cells: Vec<u16>) -> Result<Self, IterationFieldError> {
        if cells.len() != resolution.pixel_count() {
            return Err(IterationFieldError::ShapeMismatch {
                expected: resolution.pixel_count(),
                actual: cells.len(),
            });
        }

        Ok(Self { resolution, cells })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u16] {
        &mut self.cells
    }

    #[must_use]
    pub fn into_cells(self) -> Vec<u16> {
        self.cells
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the field.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u16 {
        assert!(
            self.resolution.contains(x, y),
            "cell ({}, {}) outside {} field",
            x,
            y,
            self.resolution
        );

        self.cells[y as usize * self.resolution.width() as usize + x as usize]
    }

    #[must_use]
    pub fn max(&self) -> u16 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn min(&self) -> u16 {
        self.cells.iter().copied().min().unwrap_or(0)
    }

    /// Smallest count above zero, `None` when every cell is zero.
    #[must_use]
    pub fn min_nonzero(&self) -> Option<u16> {
        self.cells.iter().copied().filter(|&c| c > 0).min()
    }

    /// Replaces every cell with `cell % modulus`. A zero modulus leaves the
    /// field untouched.
    pub fn wrap(&mut self, modulus: u32) {
        if modulus == 0 {
            return;
        }

        for cell in &mut self.cells {
            *cell = (u32::from(*cell) % modulus) as u16;
        }
    }
}
