use crate::core::data::complex::Complex;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::fractal_kinds::FractalKind;

/// Everything one render needs from the navigation state, copied out before
/// the render starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub fractal: FractalKind,
    pub center: Complex,
    pub width: f64,
    pub max_iterations: u32,
}

impl RenderParams {
    pub fn viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(self.center, self.width)
    }
}
