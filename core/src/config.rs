use core::time::Duration;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// A door in the outer wall, opening onto `row` of the playable area.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub cols: [Coord; 2],
    pub row: Coord,
}

impl Door {
    pub const fn new(cols: [Coord; 2], row: Coord) -> Self {
        Self { cols, row }
    }

    /// The cell a player stands on when using this door.
    pub const fn position(&self) -> Position {
        Position::new(self.cols[0], self.row)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let row = self.row;
        self.cols.into_iter().map(move |col| Position::new(col, row))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub base: f64,
    pub growth_per_level: f64,
    pub max_multiplier: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            base: 0.10,
            growth_per_level: 0.15,
            max_multiplier: 2.0,
        }
    }
}

impl DensityConfig {
    /// Grows linearly from 1.0 at level 1 and saturates at `max_multiplier`.
    pub fn multiplier(&self, level: Level) -> f64 {
        let grown = 1.0 + f64::from(level.saturating_sub(1)) * self.growth_per_level;
        grown.min(self.max_multiplier)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_per_level: u32,
    pub efficiency_bonus_max: f64,
    pub death_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_per_level: 100,
            efficiency_bonus_max: 1.5,
            death_penalty: 50,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub origin: Position,
    pub width: Coord,
    pub height: Coord,
    pub entry: Door,
    pub exit: Door,
    pub buffer_radius: Coord,
    pub density: DensityConfig,
    pub scoring: ScoringConfig,
    pub initial_lives: u32,
    pub max_generation_attempts: u32,
    pub replay_speed_multiplier: f32,
    pub waiting_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(1, 2),
            width: 30,
            height: 20,
            entry: Door::new([15, 16], 21),
            exit: Door::new([15, 16], 2),
            buffer_radius: 1,
            density: DensityConfig::default(),
            scoring: ScoringConfig::default(),
            initial_lives: 3,
            max_generation_attempts: 100,
            replay_speed_multiplier: 2.0,
            waiting_timeout: Duration::from_secs(3),
        }
    }
}

impl GameConfig {
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.origin, self.width, self.height)
    }

    pub const fn entry_position(&self) -> Position {
        self.entry.position()
    }

    pub const fn exit_position(&self) -> Position {
        self.exit.position()
    }

    pub fn door_cells(&self) -> impl Iterator<Item = Position> + use<> {
        self.entry.cells().chain(self.exit.cells())
    }

    pub fn is_in_buffer_zone(&self, pos: Position) -> bool {
        self.door_cells()
            .any(|door| door.chebyshev(pos) <= self.buffer_radius)
    }

    /// Border ring of the playable area plus the buffer zone around every door cell.
    pub fn forbidden_positions(&self) -> HashSet<Position> {
        let bounds = self.bounds();
        let mut forbidden: HashSet<Position> =
            bounds.positions().filter(|&pos| bounds.is_border(pos)).collect();

        let r = self.buffer_radius;
        for door in self.door_cells() {
            for dy in -r..=r {
                for dx in -r..=r {
                    forbidden.insert(door + Position::new(dx, dy));
                }
            }
        }
        forbidden
    }

    /// Number of playable cells a mine may be placed on.
    pub fn available_cells(&self) -> CellCount {
        let forbidden = self.forbidden_positions();
        let count = self
            .bounds()
            .positions()
            .filter(|pos| !forbidden.contains(pos))
            .count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self, level: Level) -> CellCount {
        self.mines_for_multiplier(self.density.multiplier(level))
    }

    /// Mine count once the density multiplier has saturated.
    pub fn max_mine_count(&self) -> CellCount {
        self.mines_for_multiplier(self.density.max_multiplier)
    }

    fn mines_for_multiplier(&self, multiplier: f64) -> CellCount {
        let area = f64::from(self.bounds().area());
        // `as` truncates toward zero and saturates, which is the floor for these values
        (area * self.density.base * multiplier) as CellCount
    }

    /// Startup check; every error returned here is a bad constant, not a runtime condition.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.width.saturating_mul(self.height) > Coord::from(CellCount::MAX) {
            return Err(GameError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_generation_attempts == 0 {
            return Err(GameError::NoGenerationAttempts);
        }

        let bounds = self.bounds();
        if !self.door_cells().all(|cell| bounds.contains(cell)) {
            return Err(GameError::DoorOutOfBounds);
        }

        let requested = self.max_mine_count();
        let available = self.available_cells();
        if requested > available {
            return Err(GameError::TooManyMines {
                requested,
                available,
            });
        }

        Ok(())
    }
}

/// Colour family a level is drawn in, cycling every five levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTheme {
    Yellow,
    Orange,
    Green,
    Cyan,
    Pink,
}

impl LevelTheme {
    pub const CYCLE: [LevelTheme; 5] = [
        Self::Yellow,
        Self::Orange,
        Self::Green,
        Self::Cyan,
        Self::Pink,
    ];

    pub const fn for_level(level: Level) -> Self {
        let index = (level.saturating_sub(1) as usize) % Self::CYCLE.len();
        Self::CYCLE[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn door_positions() {
        let config = GameConfig::default();

        assert_eq!(config.entry_position(), Position::new(15, 21));
        assert_eq!(config.exit_position(), Position::new(15, 2));
    }

    #[test]
    fn buffer_zone_uses_chebyshev_distance() {
        let config = GameConfig {
            entry: Door::new([15, 16], 21),
            ..Default::default()
        };

        assert!(config.is_in_buffer_zone(Position::new(15, 20)));
        assert!(config.is_in_buffer_zone(Position::new(16, 20)));
        assert!(config.is_in_buffer_zone(Position::new(14, 21)));
        assert!(config.is_in_buffer_zone(Position::new(17, 21)));
        assert!(!config.is_in_buffer_zone(Position::new(15, 19)));
        assert!(!config.is_in_buffer_zone(Position::new(13, 21)));
        assert!(!config.is_in_buffer_zone(Position::new(20, 20)));
    }

    #[test]
    fn forbidden_positions_cover_borders_and_doors() {
        let config = GameConfig::default();
        let forbidden = config.forbidden_positions();

        assert!(forbidden.contains(&Position::new(1, 2)));
        assert!(forbidden.contains(&Position::new(1, 21)));
        assert!(forbidden.contains(&Position::new(1, 10)));
        assert!(forbidden.contains(&Position::new(30, 10)));

        for door in config.door_cells() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    assert!(forbidden.contains(&(door + Position::new(dx, dy))));
                }
            }
        }

        assert!(!forbidden.contains(&Position::new(10, 10)));
        assert!(!forbidden.contains(&Position::new(20, 15)));
    }

    #[test]
    fn mine_count_grows_then_saturates() {
        let config = GameConfig::default();

        let counts: alloc::vec::Vec<_> = (1..=20).map(|level| config.mine_count(level)).collect();
        assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(config.mine_count(1) < config.mine_count(5));

        assert_eq!(config.mine_count(1), 60);
        assert_eq!(config.mine_count(10_000), config.max_mine_count());
        assert_eq!(config.max_mine_count(), 120);
    }

    #[test]
    fn validate_rejects_overfull_board() {
        let config = GameConfig {
            density: DensityConfig {
                base: 0.9,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(GameError::TooManyMines { .. })
        ));
    }

    #[test]
    fn validate_rejects_board_past_cell_count() {
        let config = GameConfig {
            width: 300,
            height: 300,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(GameError::BoardTooLarge {
                width: 300,
                height: 300
            })
        );
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn validate_rejects_door_outside_board() {
        let config = GameConfig {
            exit: Door::new([15, 16], 1),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(GameError::DoorOutOfBounds));
    }

    #[test]
    fn theme_cycles_every_five_levels() {
        assert_eq!(LevelTheme::for_level(1), LevelTheme::Yellow);
        assert_eq!(LevelTheme::for_level(2), LevelTheme::Orange);
        assert_eq!(LevelTheme::for_level(5), LevelTheme::Pink);
        assert_eq!(LevelTheme::for_level(6), LevelTheme::Yellow);
    }
}
