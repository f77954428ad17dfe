use thiserror::Error;

use crate::{CellCount, Coord, Level};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, requested {requested} but only {available} cells are free")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Door cell lies outside the playable area")]
    DoorOutOfBounds,
    #[error("Playable area is empty")]
    EmptyBoard,
    #[error("Playable area of {width}x{height} cells is too large")]
    BoardTooLarge { width: Coord, height: Coord },
    #[error("Generation attempt budget must be at least one")]
    NoGenerationAttempts,
    #[error("Could not generate a solvable level {level} after {attempts} attempts")]
    LevelGenerationFailed { level: Level, attempts: u32 },
}

impl GameError {
    /// Errors caused by a bad configuration constant rather than by play.
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::TooManyMines { .. }
                | Self::DoorOutOfBounds
                | Self::EmptyBoard
                | Self::BoardTooLarge { .. }
                | Self::NoGenerationAttempts
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
