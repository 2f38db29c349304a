use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;

/// Generation strategy that scatters hazards uniformly at random.
///
/// All randomness comes from the seed, so the same seed and config always produce the same field.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomFieldGenerator {
    seed: u64,
    sampling: HazardSampling,
}

impl RandomFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            sampling: HazardSampling::default(),
        }
    }

    /// Uses a seed drawn from the OS, it is logged so the field can be rebuilt later.
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        log::info!("Using random seed {}", seed);
        Self::new(seed)
    }

    pub fn with_sampling(self, sampling: HazardSampling) -> Self {
        Self { sampling, ..self }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sampling(&self) -> HazardSampling {
        self.sampling
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: FieldConfig) -> Result<Field> {
        config.validate()?;

        let (rows, cols) = self.sampling.sample_area(config.size());
        let sample_cells = rows.saturating_mul(cols);
        if config.hazards() > sample_cells {
            return Err(GameError::TooManyHazards {
                requested: config.hazards(),
                max: sample_cells,
            });
        }

        log::debug!(
            "Generating {}x{} field with {} hazards, seed {}, {:?}",
            config.height(),
            config.width(),
            config.hazards(),
            self.seed,
            self.sampling
        );

        let mut field = Field::blank(config.size());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut placed = 0;
        let mut draws: u64 = 0;

        // rejection sampling, at most half of the cells are taken so a free one is found quickly
        while placed < config.hazards() {
            let pos = Position::new(rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;
            if field.place_hazard(pos) {
                placed += 1;
            }
        }
        log::trace!("Placed {} hazards in {} draws", placed, draws);

        field.fill_adjacent_hazards();

        // double check hazard count
        if field.hazard_count() != config.hazards() {
            log::warn!(
                "Generated field hazard count mismatch, actual: {}, requested: {}",
                field.hazard_count(),
                config.hazards()
            );
        }
        Ok(field)
    }
}
