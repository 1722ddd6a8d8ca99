use crate::core::data::colour::Colour;

/// Colours indexed by iteration count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTable {
    colours: Vec<Colour>,
}

impl PaletteTable {
    #[must_use]
    pub fn from_colours(colours: Vec<Colour>) -> Self {
        Self { colours }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}
