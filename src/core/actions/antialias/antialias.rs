use rayon::prelude::*;

use crate::core::data::iteration_field::IterationField;
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AntialiasError {
    FieldShapeMismatch {
        expected: Resolution,
        actual: Resolution,
    },
}

impl fmt::Display for AntialiasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "antialiasing needs a {} field, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl Error for AntialiasError {}

/// Reduces a `2W x 2H` field to `W x H`, one output cell per 2x2 block.
///
/// With `a = (2i, 2j)`, `b = (2i+1, 2j)`, `c = (2i+1, 2j+1)` and
/// `d = (2i, 2j+1)` the output is `a + b + c + d / 4`, truncated. Only the
/// last corner is divided, which keeps output identical to existing renders;
/// callers size their palettes from the resulting field, never from the cap.
/// Sums above `u16::MAX` wrap.
pub fn antialias(field: &IterationField, output: Resolution) -> Result<IterationField, AntialiasError> {
    let expected = Resolution::new(output.width() * 2, output.height() * 2).map_err(|_| {
        AntialiasError::FieldShapeMismatch {
            expected: output,
            actual: field.resolution(),
        }
    })?;

    if field.resolution() != expected {
        return Err(AntialiasError::FieldShapeMismatch {
            expected,
            actual: field.resolution(),
        });
    }

    let source_width = expected.width() as usize;
    let output_width = output.width() as usize;
    let source = field.cells();
    let mut reduced = IterationField::new(output);

    reduced
        .cells_mut()
        .par_chunks_mut(output_width)
        .enumerate()
        .for_each(|(j, row)| {
            let top = &source[2 * j * source_width..(2 * j + 1) * source_width];
            let bottom = &source[(2 * j + 1) * source_width..(2 * j + 2) * source_width];

            for (i, cell) in row.iter_mut().enumerate() {
                let a = u32::from(top[2 * i]);
                let b = u32::from(top[2 * i + 1]);
                let c = u32::from(bottom[2 * i + 1]);
                let d = u32::from(bottom[2 * i]);

                *cell = (a + b + c + d / 4) as u16;
            }
        });

    Ok(reduced)
}
