use std::{error::Error, fmt};

/// Fields store counts as `u16`, so the cap must fit in one.
pub const MAX_ITERATION_CAP: u32 = u16::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationCapError {
    OutOfRange { max_iterations: u32 },
}

impl fmt::Display for IterationCapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { max_iterations } => {
                write!(
                    f,
                    "iteration cap must be between 1 and {}, got {}",
                    MAX_ITERATION_CAP, max_iterations
                )
            }
        }
    }
}

impl Error for IterationCapError {}

pub(crate) fn validate_iteration_cap(max_iterations: u32) -> Result<u32, IterationCapError> {
    if max_iterations == 0 || max_iterations > MAX_ITERATION_CAP {
        return Err(IterationCapError::OutOfRange { max_iterations });
    }

    Ok(max_iterations)
}
