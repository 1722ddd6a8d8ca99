use crate::core::actions::compose::compose::{ComposeError, compose};
use crate::core::actions::plan_animation::errors::PlanAnimationError;
use crate::core::data::iteration_field::IterationField;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::palette::palette::Palette;
use crate::core::util::percentile::percentile;
use std::fmt;
use std::str::FromStr;

/// Percentile of the nonzero counts that bounds the sweep from above.
const SWEEP_UPPER_PERCENTILE: f64 = 99.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SweepMode {
    /// Reveal every count up to a rising threshold.
    #[default]
    Add,
    /// Light up one count per frame.
    Single,
}

impl SweepMode {
    pub const ALL: &'static [Self] = &[Self::Add, Self::Single];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Single => "Single",
        }
    }
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSweepMode(pub String);

impl fmt::Display for UnknownSweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sweep mode '{}', expected add or single", self.0)
    }
}

impl std::error::Error for UnknownSweepMode {}

impl FromStr for SweepMode {
    type Err = UnknownSweepMode;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "single" => Ok(Self::Single),
            _ => Err(UnknownSweepMode(input.to_string())),
        }
    }
}

/// An iteration sweep over one precomputed field.
///
/// Frame `k` works on the threshold `min + k`, where `min` is the smallest
/// nonzero count and the sweep stops before `max`, one above the rounded-up
/// 99.9th percentile of the nonzero counts. Frames only recolour the field,
/// so they can be produced in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationSweep {
    field: IterationField,
    mode: SweepMode,
    min_iterations: u16,
    max_iterations: u32,
}

impl IterationSweep {
    pub fn new(field: IterationField, mode: SweepMode) -> Result<Self, PlanAnimationError> {
        let escaped: Vec<u16> = field.cells().iter().copied().filter(|&c| c > 0).collect();

        let min_iterations = escaped
            .iter()
            .copied()
            .min()
            .ok_or(PlanAnimationError::DegenerateField)?;
        let upper = percentile(&escaped, SWEEP_UPPER_PERCENTILE).ok_or(PlanAnimationError::DegenerateField)?;
        let max_iterations = upper.ceil() as u32 + 1;

        Ok(Self {
            field,
            mode,
            min_iterations,
            max_iterations,
        })
    }

    #[must_use]
    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    #[must_use]
    pub fn field(&self) -> &IterationField {
        &self.field
    }

    #[must_use]
    pub fn min_iterations(&self) -> u16 {
        self.min_iterations
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// `max - min`, always at least 1.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        (self.max_iterations - u32::from(self.min_iterations)) as usize
    }

    #[must_use]
    pub fn threshold(&self, index: usize) -> u32 {
        u32::from(self.min_iterations) + index as u32
    }

    /// Colours frame `index`.
    ///
    /// In [`SweepMode::Add`] every count at or above the threshold becomes
    /// background. In [`SweepMode::Single`] the untouched field is shown
    /// through a palette that lights up the threshold count only.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`frame_count`](Self::frame_count).
    pub fn recolour(&self, index: usize, palette: &Palette) -> Result<PixelBuffer, ComposeError> {
        assert!(
            index < self.frame_count(),
            "sweep frame {} out of range for {} frames",
            index,
            self.frame_count()
        );

        let threshold = self.threshold(index);
        let min_index = usize::from(self.min_iterations);

        match self.mode {
            SweepMode::Add => {
                let mut field = self.field.clone();
                for cell in field.cells_mut() {
                    if u32::from(*cell) >= threshold {
                        *cell = 0;
                    }
                }

                let table = palette.build(self.max_iterations as usize + 1, min_index, None);
                compose(&field, &table)
            }
            SweepMode::Single => {
                let table = palette.build(
                    usize::from(self.field.max()) + 1,
                    min_index,
                    Some(threshold as usize),
                );
                compose(&self.field, &table)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::resolution::Resolution;
    use crate::core::palette::colour_mode::ColourMode;
    use crate::core::palette::noise_offsets::NoiseOffsets;

    fn field(cells: Vec<u16>) -> IterationField {
        let width = cells.len() as u32;
        IterationField::from_cells(Resolution::new(width, 1).unwrap(), cells).unwrap()
    }

    fn grayscale() -> Palette {
        Palette::new(ColourMode::Grayscale, NoiseOffsets::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn test_bounds_from_nonzero_counts() {
        let sweep = IterationSweep::new(field(vec![0, 3, 4, 5, 6, 0]), SweepMode::Add).unwrap();

        // 99.9th percentile of [3, 4, 5, 6] is 5.997, rounded up to 6
        assert_eq!(sweep.min_iterations(), 3);
        assert_eq!(sweep.max_iterations(), 7);
        assert_eq!(sweep.frame_count(), 4);
    }

    #[test]
    fn test_all_zero_field_is_degenerate() {
        assert_eq!(
            IterationSweep::new(field(vec![0, 0, 0]), SweepMode::Single),
            Err(PlanAnimationError::DegenerateField)
        );
    }

    #[test]
    fn test_flat_field_gives_one_frame() {
        let sweep = IterationSweep::new(field(vec![9, 9, 9]), SweepMode::Add).unwrap();

        assert_eq!(sweep.frame_count(), 1);
    }

    #[test]
    fn test_add_mode_hides_counts_at_or_above_threshold() {
        let sweep = IterationSweep::new(field(vec![0, 3, 4, 5, 6]), SweepMode::Add).unwrap();

        // frame 1 has threshold 4, so only the 3 stays visible
        let image = sweep.recolour(1, &grayscale()).unwrap();
        assert_ne!(image.pixel(1, 0), Some(Colour::BLACK));
        for x in [0, 2, 3, 4] {
            assert_eq!(image.pixel(x, 0), Some(Colour::BLACK));
        }
    }

    #[test]
    fn test_add_mode_keeps_visible_pixels_a_subset_of_the_source() {
        let source = vec![0, 3, 9, 4, 7, 0, 5];
        let sweep = IterationSweep::new(field(source.clone()), SweepMode::Add).unwrap();

        for index in 0..sweep.frame_count() {
            let image = sweep.recolour(index, &grayscale()).unwrap();
            for (x, &count) in source.iter().enumerate() {
                if count == 0 {
                    assert_eq!(image.pixel(x as u32, 0), Some(Colour::BLACK));
                }
            }
        }
    }

    #[test]
    fn test_single_mode_lights_only_the_threshold() {
        let sweep = IterationSweep::new(field(vec![0, 3, 4, 5, 6]), SweepMode::Single).unwrap();

        // frame 2 highlights count 5
        let image = sweep.recolour(2, &grayscale()).unwrap();
        assert_eq!(image.pixel(3, 0), Some(Colour::WHITE));
        for x in [0, 1, 2, 4] {
            assert_eq!(image.pixel(x, 0), Some(Colour::BLACK));
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_recolour_past_the_end_panics() {
        let sweep = IterationSweep::new(field(vec![2, 3]), SweepMode::Add).unwrap();
        let _ = sweep.recolour(sweep.frame_count(), &grayscale());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("add".parse::<SweepMode>(), Ok(SweepMode::Add));
        assert_eq!(" Single ".parse::<SweepMode>(), Ok(SweepMode::Single));
        assert!("both".parse::<SweepMode>().is_err());
    }
}
