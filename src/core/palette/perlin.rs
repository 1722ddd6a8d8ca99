//! One-dimensional gradient noise over Ken Perlin's permutation table, with
//! fractal octaves and a repeat period along the axis.

#[rustfmt::skip]
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// First component of the 3-D gradient set, indexed by `hash & 15`.
const GRADIENTS: [f64; 16] = [
    1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0,
];

const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

#[inline]
fn gradient(hash: u8, x: f64) -> f64 {
    GRADIENTS[usize::from(hash & 15)] * x
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn noise(x: f64, repeat: i64) -> f64 {
    let repeat = repeat.max(1);
    let cell = x.floor();
    let left = (cell as i64).rem_euclid(repeat);
    let right = (left + 1).rem_euclid(repeat);
    let x = x - cell;
    let fade = x * x * x * (x * (x * 6.0 - 15.0) + 10.0);

    lerp(
        fade,
        gradient(PERMUTATION[(left & 255) as usize], x),
        gradient(PERMUTATION[(right & 255) as usize], x - 1.0),
    ) * 0.4
}

/// Perlin noise at `x`, summed over `octaves` with halving amplitude and
/// doubling frequency, normalised by the total amplitude.
pub fn perlin_noise_1d(x: f64, octaves: u32, repeat: i64) -> f64 {
    if octaves <= 1 {
        return noise(x, repeat);
    }

    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut total = 0.0;
    let mut max = 0.0;

    for _ in 0..octaves {
        total += noise(x * frequency, (repeat as f64 * frequency) as i64) * amplitude;
        max += amplitude;
        frequency *= LACUNARITY;
        amplitude *= PERSISTENCE;
    }

    total / max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_a_permutation() {
        let mut seen = [false; 256];
        for &value in PERMUTATION.iter() {
            assert!(!seen[usize::from(value)], "{} repeats", value);
            seen[usize::from(value)] = true;
        }
    }

    #[test]
    fn noise_vanishes_on_lattice_points() {
        for i in 0..10 {
            assert_eq!(perlin_noise_1d(i as f64, 1, 8192), 0.0);
            assert_eq!(perlin_noise_1d(i as f64, 3, 8192), 0.0);
        }
    }

    #[test]
    fn noise_is_bounded() {
        for i in 0..1000 {
            let x = i as f64 * 0.0137;
            let value = perlin_noise_1d(x, 3, 8192);

            assert!(value.abs() <= 0.4, "noise({}) = {}", x, value);
        }
    }

    #[test]
    fn noise_is_deterministic_and_smooth() {
        let a = perlin_noise_1d(0.3141, 3, 8192);
        let b = perlin_noise_1d(0.3141, 3, 8192);
        let nearby = perlin_noise_1d(0.3142, 3, 8192);

        assert_eq!(a, b);
        assert!((a - nearby).abs() < 0.01);
    }

    #[test]
    fn noise_is_not_constant() {
        let samples: Vec<f64> = (1..20).map(|i| perlin_noise_1d(i as f64 * 0.05, 3, 8192)).collect();

        assert!(samples.iter().any(|&v| v.abs() > 1e-3));
    }
}
