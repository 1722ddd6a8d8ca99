use crate::core::actions::sample_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::errors::IterationCapError;
use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia {
        constant: Complex,
    },
}

impl FractalKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    /// Binds the kernel for this family to an iteration cap.
    pub fn algorithm(self, max_iterations: u32) -> Result<EscapeAlgorithm, IterationCapError> {
        Ok(match self {
            Self::Mandelbrot => EscapeAlgorithm::Mandelbrot(MandelbrotAlgorithm::new(max_iterations)?),
            Self::Julia { constant } => {
                EscapeAlgorithm::Julia(JuliaAlgorithm::new(constant, max_iterations)?)
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscapeAlgorithm {
    Mandelbrot(MandelbrotAlgorithm),
    Julia(JuliaAlgorithm),
}

impl FractalAlgorithm for EscapeAlgorithm {
    fn max_iterations(&self) -> u32 {
        match self {
            Self::Mandelbrot(algorithm) => algorithm.max_iterations(),
            Self::Julia(algorithm) => algorithm.max_iterations(),
        }
    }

    #[inline]
    fn compute(&self, point: Complex) -> u32 {
        match self {
            Self::Mandelbrot(algorithm) => algorithm.compute(point),
            Self::Julia(algorithm) => algorithm.compute(point),
        }
    }
}
