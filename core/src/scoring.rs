use crate::*;

impl ScoringConfig {
    /// Linear in the level number.
    pub fn base_score(&self, level: Level) -> u32 {
        self.base_per_level.saturating_mul(level)
    }

    /// Multiplier in `[0, efficiency_bonus_max]`; one full unit is lost per `optimal_moves`
    /// extra moves.
    pub fn efficiency_bonus(&self, moves: u32, optimal_moves: u32) -> f64 {
        if moves <= optimal_moves {
            return self.efficiency_bonus_max;
        }
        if optimal_moves == 0 {
            return 0.0;
        }

        let extra = f64::from(moves - optimal_moves);
        let bonus = self.efficiency_bonus_max - extra / f64::from(optimal_moves);
        bonus.max(0.0)
    }

    pub fn level_score(&self, level: Level, moves: u32, optimal_moves: u32) -> u32 {
        let base = f64::from(self.base_score(level));
        // truncation of a non-negative value is its floor
        (base * self.efficiency_bonus(moves, optimal_moves)) as u32
    }

    pub fn apply_death_penalty(&self, score: u32) -> u32 {
        score.saturating_sub(self.death_penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn base_score_scales_linearly() {
        let rules = rules();

        assert_eq!(rules.base_score(1), 100);
        assert_eq!(rules.base_score(2), 200);
        assert_eq!(rules.base_score(20), 2000);
    }

    #[test]
    fn efficiency_bonus_values() {
        let rules = rules();
        let cases = [
            (10, 10, 1.5),
            (15, 10, 1.0),
            (20, 10, 0.5),
            (25, 10, 0.0),
            (30, 10, 0.0),
            (5, 10, 1.5),
            (1000, 10, 0.0),
        ];

        for (moves, optimal, expected) in cases {
            let bonus = rules.efficiency_bonus(moves, optimal);
            let diff = if bonus > expected { bonus - expected } else { expected - bonus };
            assert!(
                diff < 1e-9,
                "{moves} vs {optimal}: got {bonus}, expected {expected}"
            );
        }
    }

    #[test]
    fn zero_optimal_only_rewards_zero_moves() {
        let rules = rules();

        assert_eq!(rules.efficiency_bonus(0, 0), 1.5);
        assert_eq!(rules.efficiency_bonus(3, 0), 0.0);
    }

    #[test]
    fn level_score_boundaries() {
        let rules = rules();

        assert_eq!(rules.level_score(1, 10, 10), 150);
        assert_eq!(rules.level_score(1, 15, 10), 100);
        assert_eq!(rules.level_score(1, 25, 10), 0);
        assert_eq!(rules.level_score(2, 15, 10), 200);
        assert_eq!(rules.level_score(4, 14, 8), 300);
    }

    #[test]
    fn death_penalty_floors_at_zero() {
        let rules = rules();

        assert_eq!(rules.apply_death_penalty(25), 0);
        assert_eq!(rules.apply_death_penalty(50), 0);
        assert_eq!(rules.apply_death_penalty(120), 70);
    }
}
