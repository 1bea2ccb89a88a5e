use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator settings that are not part of the workload itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fixed RNG seed. `None` draws from OS entropy, so every run differs.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = GeneratorConfig::new().with_seed(42);
        let (mut a, mut b) = (config.rng(), config.rng());
        for _ in 0..8 {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
    }

    #[test]
    fn test_default_is_unseeded() {
        assert_eq!(GeneratorConfig::new().seed, None);
    }
}
