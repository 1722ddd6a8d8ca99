use crate::core::data::colour::Colour;

/// Gray level for `index`, rising linearly from just above black at
/// `min_index` to white at `table_size - 1`. Index 0 and everything below
/// `min_index` is background.
#[must_use]
pub fn grayscale_colour(index: usize, table_size: usize, min_index: usize) -> Colour {
    if index == 0 || index < min_index || index >= table_size {
        return Colour::BLACK;
    }

    let steps = (table_size - min_index) as u64;
    let level = 255 * (index - min_index + 1) as u64 / steps;

    Colour::gray(level.min(255) as u8)
}
