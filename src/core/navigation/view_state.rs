use crate::core::data::complex::Complex;
use crate::core::fractals::errors::MAX_ITERATION_CAP;
use crate::core::navigation::command::Step;

/// Centre, width and iteration cap of one navigable view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: Complex,
    pub width: f64,
    pub max_iterations: u32,
}

impl ViewState {
    pub const MANDELBROT_START: Self = Self {
        center: Complex::new(-0.5, 0.0),
        width: 4.5,
        max_iterations: 100,
    };

    pub const MANDELBROT_RESET: Self = Self {
        center: Complex::new(-0.5, 0.0),
        width: 5.0,
        max_iterations: 100,
    };

    pub const JULIA_START: Self = Self {
        center: Complex::ZERO,
        width: 4.0,
        max_iterations: 100,
    };

    pub fn pan(&mut self, dx: f64, dy: f64, step: Step) {
        let distance = self.width * step.pan_fraction();
        self.center.real += dx * distance;
        self.center.imag += dy * distance;
    }

    pub fn scale_width(&mut self, factor: f64) {
        self.width *= factor;
    }

    /// Scales the cap and truncates, keeping it within `1..=MAX_ITERATION_CAP`.
    pub fn scale_iterations(&mut self, factor: f64) {
        let scaled = (f64::from(self.max_iterations) * factor) as u32;
        self.max_iterations = scaled.clamp(1, MAX_ITERATION_CAP);
    }
}
