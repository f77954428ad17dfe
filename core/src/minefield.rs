use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine layout of one level, together with the door cells it was generated around.
///
/// Never mutated once built; consumers share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minefield {
    bounds: Bounds,
    entry: Position,
    exit: Position,
    mines: HashSet<Position>,
}

impl Minefield {
    pub(crate) fn new_unchecked(
        bounds: Bounds,
        entry: Position,
        exit: Position,
        mines: HashSet<Position>,
    ) -> Self {
        Self {
            bounds,
            entry,
            exit,
            mines,
        }
    }

    /// Builds a layout from explicit mine coordinates on the board described by `config`.
    pub fn from_mine_coords(config: &GameConfig, mine_coords: &[Position]) -> Result<Self> {
        let bounds = config.bounds();
        let mut mines = HashSet::with_capacity(mine_coords.len());

        for &coords in mine_coords {
            if !bounds.contains(coords) {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(coords);
        }

        Ok(Self::new_unchecked(
            bounds,
            config.entry_position(),
            config.exit_position(),
            mines,
        ))
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> Coord {
        self.bounds.width
    }

    pub fn height(&self) -> Coord {
        self.bounds.height
    }

    pub fn entry(&self) -> Position {
        self.entry
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn mine_count(&self) -> CellCount {
        CellCount::try_from(self.mines.len()).unwrap_or(CellCount::MAX)
    }

    pub fn mines(&self) -> impl Iterator<Item = Position> + '_ {
        self.mines.iter().copied()
    }

    pub fn has_mine_at(&self, pos: Position) -> bool {
        self.mines.contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }

    /// In bounds and free of mines.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.contains(pos) && !self.has_mine_at(pos)
    }

    /// Mines on the in-bounds cardinal neighbours of `pos`.
    pub fn adjacent_mine_count(&self, pos: Position) -> u8 {
        pos.cardinal_neighbors()
            .filter(|&next| self.contains(next) && self.has_mine_at(next))
            .count() as u8
    }
}
