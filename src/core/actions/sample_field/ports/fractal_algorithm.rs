use crate::core::data::complex::Complex;

/// One escape-time kernel with its fixed parameters bound.
pub trait FractalAlgorithm {
    fn max_iterations(&self) -> u32;

    /// Escape count of `point`, always in `1..=max_iterations`.
    fn compute(&self, point: Complex) -> u32;
}
