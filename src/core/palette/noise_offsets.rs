use rand::Rng;

/// Per-channel phase offsets for the smooth-noise palette, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseOffsets {
    values: [f64; 3],
}

impl NoiseOffsets {
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            values: [red, green, blue],
        }
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.r#gen(), rng.r#gen(), rng.r#gen())
    }

    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    #[must_use]
    pub fn values(&self) -> [f64; 3] {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_offsets_are_unit_phases() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let offsets = NoiseOffsets::random_with(&mut rng);
            assert!(offsets.values().iter().all(|v| (0.0..1.0).contains(v)));
        }
    }

    #[test]
    fn same_seed_gives_same_offsets() {
        let a = NoiseOffsets::random_with(&mut StdRng::seed_from_u64(42));
        let b = NoiseOffsets::random_with(&mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }
}
