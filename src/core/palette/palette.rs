use rand::Rng;

use crate::core::data::colour::Colour;
use crate::core::palette::colour_mode::ColourMode;
use crate::core::palette::maps::cyclic_gradient::{cyclic_gradient_colour, cyclic_gradient_native};
use crate::core::palette::maps::grayscale::grayscale_colour;
use crate::core::palette::maps::smooth_noise::smooth_noise_colour;
use crate::core::palette::noise_offsets::NoiseOffsets;
use crate::core::palette::palette_table::PaletteTable;

/// The colouring state of a session: the selected strategy plus the noise
/// offsets, which survive mode changes so that returning to the noise
/// palette shows the same hues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    mode: ColourMode,
    offsets: NoiseOffsets,
}

impl Palette {
    #[must_use]
    pub fn new(mode: ColourMode, offsets: NoiseOffsets) -> Self {
        Self { mode, offsets }
    }

    /// A palette in `mode` with freshly drawn noise offsets.
    #[must_use]
    pub fn with_random_offsets(mode: ColourMode) -> Self {
        Self::new(mode, NoiseOffsets::random())
    }

    #[must_use]
    pub fn mode(&self) -> ColourMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColourMode) {
        self.mode = mode;
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
    }

    #[must_use]
    pub fn offsets(&self) -> NoiseOffsets {
        self.offsets
    }

    pub fn new_offsets(&mut self) {
        self.offsets = NoiseOffsets::random();
    }

    pub fn new_offsets_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.offsets = NoiseOffsets::random_with(rng);
    }

    /// Builds a table of `table_size` colours.
    ///
    /// With `highlight` set every entry is black except the highlighted one,
    /// which gets the strategy's own colour (white for grayscale).
    #[must_use]
    pub fn build(&self, table_size: usize, min_index: usize, highlight: Option<usize>) -> PaletteTable {
        let colours = (0..table_size)
            .map(|index| match highlight {
                Some(highlighted) if highlighted == index => self.highlight_colour(index),
                Some(_) => Colour::BLACK,
                None => self.colour(index, table_size, min_index),
            })
            .collect();

        PaletteTable::from_colours(colours)
    }

    fn colour(&self, index: usize, table_size: usize, min_index: usize) -> Colour {
        match self.mode {
            ColourMode::Grayscale => grayscale_colour(index, table_size, min_index),
            ColourMode::CyclicGradient => cyclic_gradient_colour(index, min_index),
            ColourMode::SmoothNoise => smooth_noise_colour(index, &self.offsets),
        }
    }

    fn highlight_colour(&self, index: usize) -> Colour {
        match self.mode {
            ColourMode::Grayscale => Colour::WHITE,
            ColourMode::CyclicGradient => cyclic_gradient_native(index),
            ColourMode::SmoothNoise => smooth_noise_colour(index, &self.offsets),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_random_offsets(ColourMode::default())
    }
}
