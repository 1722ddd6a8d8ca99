use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::data::iteration_field::IterationField;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::palette::palette_table::PaletteTable;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ComposeError {
    /// The table was built from a smaller maximum than the field holds.
    PaletteIndexOutOfRange {
        index: u16,
        table_len: usize,
        x: u32,
        y: u32,
    },
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PaletteIndexOutOfRange {
                index,
                table_len,
                x,
                y,
            } => {
                write!(
                    f,
                    "iteration count {} at ({}, {}) is outside a palette of {} colours",
                    index, x, y, table_len
                )
            }
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for ComposeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PixelBuffer(err) => Some(err),
            Self::PaletteIndexOutOfRange { .. } => None,
        }
    }
}

impl From<PixelBufferError> for ComposeError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Error type for cancelable composition.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeCancelableError {
    Cancelled(Cancelled),
    Compose(ComposeError),
}

impl fmt::Display for ComposeCancelableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::Compose(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ComposeCancelableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::Compose(err) => Some(err),
        }
    }
}

/// Looks every cell of `field` up in `table`. Pixel `(x, y)` of the result
/// is the colour of field cell `(x, y)`, so image rows follow the field's
/// second axis.
///
/// For cancel-aware composition, use [`compose_cancelable`].
pub fn compose(field: &IterationField, table: &PaletteTable) -> Result<PixelBuffer, ComposeError> {
    compose_cancelable_impl(field, table, &NeverCancel).map_err(|e| match e {
        ComposeCancelableError::Compose(err) => err,
        ComposeCancelableError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

pub fn compose_cancelable<C: CancelToken>(
    field: &IterationField,
    table: &PaletteTable,
    cancel: &C,
) -> Result<PixelBuffer, ComposeCancelableError> {
    compose_cancelable_impl(field, table, cancel)
}

/// Streams RGB bytes into a preallocated buffer, checking `cancel` every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] cells.
pub(crate) fn compose_cancelable_impl<C: CancelToken>(
    field: &IterationField,
    table: &PaletteTable,
    cancel: &C,
) -> Result<PixelBuffer, ComposeCancelableError> {
    let resolution = field.resolution();
    let width = resolution.width() as usize;
    let mut buffer: PixelBufferData = Vec::with_capacity(resolution.pixel_count() * 3);

    for (i, &index) in field.cells().iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(ComposeCancelableError::Cancelled(Cancelled));
        }

        let colour = table.get(usize::from(index)).ok_or_else(|| {
            ComposeCancelableError::Compose(ComposeError::PaletteIndexOutOfRange {
                index,
                table_len: table.len(),
                x: (i % width) as u32,
                y: (i / width) as u32,
            })
        })?;

        buffer.push(colour.r);
        buffer.push(colour.g);
        buffer.push(colour.b);
    }

    PixelBuffer::from_data(resolution, buffer)
        .map_err(|err| ComposeCancelableError::Compose(ComposeError::PixelBuffer(err)))
}
