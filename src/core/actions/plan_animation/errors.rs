use crate::core::fractals::errors::IterationCapError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanAnimationError {
    EmptySequence,
    NonPositiveWidth { width: f64 },
    IterationCap(IterationCapError),
    DegenerateField,
}

impl fmt::Display for PlanAnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "an animation needs at least one frame"),
            Self::NonPositiveWidth { width } => {
                write!(f, "animation width must be positive, got {}", width)
            }
            Self::IterationCap(err) => write!(f, "invalid animation iteration cap: {}", err),
            Self::DegenerateField => {
                write!(f, "every sampled point escaped immediately, nothing to sweep")
            }
        }
    }
}

impl Error for PlanAnimationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IterationCap(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IterationCapError> for PlanAnimationError {
    fn from(err: IterationCapError) -> Self {
        Self::IterationCap(err)
    }
}
