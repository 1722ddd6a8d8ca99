use crate::core::actions::sample_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::errors::{IterationCapError, validate_iteration_cap};
use crate::core::fractals::mandelbrot::algorithm::escape_time_from;

/// Escape count for the Julia family: the point only seeds the orbit and
/// `constant` is added on every step. No membership shortcuts apply.
#[must_use]
pub fn julia_escape_time(point: Complex, constant: Complex, cap: u32) -> u32 {
    escape_time_from(point, constant, cap)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaAlgorithm {
    constant: Complex,
    max_iterations: u32,
}

impl JuliaAlgorithm {
    pub fn new(constant: Complex, max_iterations: u32) -> Result<Self, IterationCapError> {
        Ok(Self {
            constant,
            max_iterations: validate_iteration_cap(max_iterations)?,
        })
    }

    #[must_use]
    pub fn constant(&self) -> Complex {
        self.constant
    }
}

impl FractalAlgorithm for JuliaAlgorithm {
    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn compute(&self, point: Complex) -> u32 {
        julia_escape_time(point, self.constant, self.max_iterations)
    }
}
