use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn config(&self) -> &GameConfig;

    /// A candidate layout for `level`, not yet checked for solvability.
    fn generate(&mut self, level: Level) -> Minefield;

    /// Regenerates until the exit is reachable from the entry, up to the configured attempt budget.
    ///
    /// The first solvable candidate wins. Exhausting the budget is an error; an unsolvable
    /// board is never handed out.
    fn generate_solvable(&mut self, level: Level) -> Result<Minefield> {
        let attempts = self.config().max_generation_attempts;

        for attempt in 1..=attempts {
            let minefield = self.generate(level);
            if has_path(minefield.entry(), minefield.exit(), &minefield) {
                log::debug!(
                    "Level {} solvable on attempt {}/{} with {} mines",
                    level,
                    attempt,
                    attempts,
                    minefield.mine_count()
                );
                return Ok(minefield);
            }
            log::warn!(
                "Level {} candidate {}/{} has no path from entry to exit, regenerating",
                level,
                attempt,
                attempts
            );
        }

        Err(GameError::LevelGenerationFailed { level, attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns a board whose row 10 is solid mines.
    struct WalledGenerator {
        config: GameConfig,
        calls: u32,
    }

    impl MinefieldGenerator for WalledGenerator {
        fn config(&self) -> &GameConfig {
            &self.config
        }

        fn generate(&mut self, _level: Level) -> Minefield {
            self.calls += 1;
            let wall: alloc::vec::Vec<_> = (1..=30).map(|x| Position::new(x, 10)).collect();
            Minefield::from_mine_coords(&self.config, &wall).unwrap()
        }
    }

    /// Walls the board until the given call, then hands out an empty one.
    struct EventuallyOpenGenerator {
        config: GameConfig,
        calls: u32,
        open_on: u32,
    }

    impl MinefieldGenerator for EventuallyOpenGenerator {
        fn config(&self) -> &GameConfig {
            &self.config
        }

        fn generate(&mut self, _level: Level) -> Minefield {
            self.calls += 1;
            let wall: alloc::vec::Vec<_> = if self.calls < self.open_on {
                (1..=30).map(|x| Position::new(x, 10)).collect()
            } else {
                alloc::vec::Vec::new()
            };
            Minefield::from_mine_coords(&self.config, &wall).unwrap()
        }
    }

    #[test]
    fn exhausting_attempts_fails_with_level_and_count() {
        let config = GameConfig {
            max_generation_attempts: 7,
            ..Default::default()
        };
        let mut generator = WalledGenerator { config, calls: 0 };

        let result = generator.generate_solvable(4);

        assert_eq!(
            result,
            Err(GameError::LevelGenerationFailed {
                level: 4,
                attempts: 7
            })
        );
        assert_eq!(generator.calls, 7);
    }

    #[test]
    fn first_solvable_candidate_wins() {
        let mut generator = EventuallyOpenGenerator {
            config: GameConfig::default(),
            calls: 0,
            open_on: 3,
        };

        let minefield = generator.generate_solvable(1).unwrap();

        assert_eq!(generator.calls, 3);
        assert_eq!(minefield.mine_count(), 0);
    }
}
