use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

/// Uniform sampling, without replacement, over every playable cell outside the forbidden zones.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl RandomMinefieldGenerator<StdRng> {
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    /// Validates `config` up front, so an infeasible mine count fails here and not mid-game.
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn generate(&mut self, level: Level) -> Minefield {
        let config = &self.config;
        let bounds = config.bounds();
        let forbidden = config.forbidden_positions();
        let candidates: Vec<Position> = bounds
            .positions()
            .filter(|pos| !forbidden.contains(pos))
            .collect();

        let requested = usize::from(config.mine_count(level));
        let count = if requested > candidates.len() {
            // unreachable for a validated config
            log::warn!(
                "Minefield already full, requested {} mines but only {} cells are free",
                requested,
                candidates.len()
            );
            candidates.len()
        } else {
            requested
        };

        let mines: HashSet<Position> =
            rand::seq::index::sample(&mut self.rng, candidates.len(), count)
                .into_iter()
                .map(|index| candidates[index])
                .collect();

        // double check mine count
        if mines.len() != count {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                mines.len(),
                count
            );
        }

        Minefield::new_unchecked(bounds, config.entry_position(), config.exit_position(), mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> RandomMinefieldGenerator {
        RandomMinefieldGenerator::from_seed(GameConfig::default(), seed).unwrap()
    }

    #[test]
    fn generates_requested_mine_count() {
        let mut generator = generator(7);

        for level in [1, 2, 5, 10] {
            let minefield = generator.generate(level);
            assert_eq!(minefield.mine_count(), generator.config().mine_count(level));
            assert_eq!(minefield.width(), 30);
            assert_eq!(minefield.height(), 20);
        }
    }

    #[test]
    fn never_places_mines_in_forbidden_cells() {
        let mut generator = generator(11);
        let config = *generator.config();
        let forbidden = config.forbidden_positions();

        for level in 1..=20 {
            let minefield = generator.generate(level);
            for mine in minefield.mines() {
                assert!(!forbidden.contains(&mine), "mine at {mine:?}");
                assert!(config.bounds().contains(mine));
                assert!(!config.bounds().is_border(mine));
                assert!(!config.is_in_buffer_zone(mine));
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generator(42).generate(3);
        let b = generator(42).generate(3);

        assert_eq!(a, b);
    }

    #[test]
    fn repeated_calls_differ() {
        let mut generator = generator(42);

        let a = generator.generate(1);
        let b = generator.generate(1);

        assert_ne!(a, b);
    }

    #[test]
    fn density_cap_holds_at_extreme_levels() {
        let mut generator = generator(3);
        let config = *generator.config();
        let cap = (f64::from(config.bounds().area())
            * config.density.base
            * config.density.max_multiplier) as CellCount;

        for level in [50, 1_000, Level::MAX] {
            assert!(generator.generate(level).mine_count() <= cap);
        }
    }

    #[test]
    fn solvable_for_many_levels() {
        let mut generator = generator(2024);

        for level in 1..=30 {
            let minefield = generator.generate_solvable(level).unwrap();
            assert!(has_path(minefield.entry(), minefield.exit(), &minefield));
        }
    }

    #[test]
    fn rejects_infeasible_config() {
        let config = GameConfig {
            density: DensityConfig {
                base: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = RandomMinefieldGenerator::from_seed(config, 0);

        assert!(matches!(result, Err(GameError::TooManyMines { .. })));
    }
}
