use crate::core::actions::sample_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::errors::{IterationCapError, validate_iteration_cap};

/// Escape count for the Mandelbrot family, where the point is both the
/// orbit seed and the recurrence constant.
///
/// Points inside the main cardioid or the period-2 bulb return `cap`
/// without iterating. The orbit starts at `z = c`, which is the first step
/// from `z = 0`, so counting begins at 1.
#[must_use]
pub fn mandelbrot_escape_time(point: Complex, cap: u32) -> u32 {
    let Complex { real: x, imag: y } = point;

    let shifted = x - 0.25;
    let q = shifted * shifted + y * y;
    if q * (q + shifted) < 0.25 * y * y {
        return cap;
    }

    if (x + 1.0) * (x + 1.0) + y * y <= 1.0 / 16.0 {
        return cap;
    }

    escape_time_from(point, point, cap)
}

/// Shared recurrence: `z <- z² + c` from `z = seed`, while `n < cap` and
/// `|z|² < 4`, starting at `n = 1`.
#[inline]
pub(crate) fn escape_time_from(seed: Complex, constant: Complex, cap: u32) -> u32 {
    let (mut x, mut y) = (seed.real, seed.imag);
    let mut n = 1;

    while n < cap && x * x + y * y < 4.0 {
        let next_x = x * x - y * y + constant.real;
        y = 2.0 * x * y + constant.imag;
        x = next_x;
        n += 1;
    }

    n
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    max_iterations: u32,
}

impl MandelbrotAlgorithm {
    pub fn new(max_iterations: u32) -> Result<Self, IterationCapError> {
        Ok(Self {
            max_iterations: validate_iteration_cap(max_iterations)?,
        })
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn compute(&self, point: Complex) -> u32 {
        mandelbrot_escape_time(point, self.max_iterations)
    }
}
