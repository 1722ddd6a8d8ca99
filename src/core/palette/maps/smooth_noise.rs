use crate::core::data::colour::Colour;
use crate::core::palette::noise_offsets::NoiseOffsets;
use crate::core::palette::perlin::perlin_noise_1d;

const SCALE: f64 = 100.0;
const OCTAVES: u32 = 3;
const REPEAT: i64 = 8192;

fn channel(index: usize, offset: f64) -> u8 {
    let phase = (index as f64 / SCALE + offset).rem_euclid(1.0);
    let value = perlin_noise_1d(phase * phase, OCTAVES, REPEAT).abs() * 255.0;

    value.min(255.0) as u8
}

/// Pseudo-random hue for `index`. Each channel reads the noise at its own
/// offset, so the channels are uncorrelated but stable for fixed offsets.
#[must_use]
pub fn smooth_noise_colour(index: usize, offsets: &NoiseOffsets) -> Colour {
    let [red, green, blue] = offsets.values();

    Colour {
        r: channel(index, red),
        g: channel(index, green),
        b: channel(index, blue),
    }
}
