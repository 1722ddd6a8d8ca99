use crate::core::data::iteration_field::IterationField;
use crate::core::palette::colour_mode::ColourMode;

/// The table size and lowest coloured index a field needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteBounds {
    pub table_size: usize,
    pub min_index: usize,
}

/// Sizes a palette from what the field actually holds: `max + 1` entries,
/// starting at the smallest nonzero count (0 when there is none).
#[must_use]
pub fn palette_bounds(field: &IterationField) -> PaletteBounds {
    PaletteBounds {
        table_size: usize::from(field.max()) + 1,
        min_index: field.min_nonzero().map_or(0, usize::from),
    }
}

/// Prepares a terminal preview for colouring.
///
/// Grayscale first shifts the field down to start at zero. Every cell is
/// then raised by one and reduced modulo the new maximum, which turns the
/// deepest cells into background (0) and keeps the rest in order.
pub fn normalise_preview(field: &mut IterationField, mode: ColourMode) {
    let offset = if mode == ColourMode::Grayscale {
        u32::from(field.min())
    } else {
        0
    };

    let max = field
        .cells()
        .iter()
        .map(|&cell| u32::from(cell) - offset + 1)
        .max()
        .unwrap_or(1);

    for cell in field.cells_mut() {
        *cell = ((u32::from(*cell) - offset + 1) % max) as u16;
    }
}
