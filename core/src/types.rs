use core::ops::Add;
use serde::{Deserialize, Serialize};

/// Single coordinate axis, signed so positions double as displacements.
pub type Coord = i32;

/// Count type used for mine counts and cell counts.
pub type CellCount = u16;

/// Level numbers start at 1.
pub type Level = u32;

/// Integer grid coordinate `(x, y)`, with `y` growing downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, `max(|dx|, |dy|)`.
    pub const fn chebyshev(self, other: Self) -> Coord {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }

    /// Manhattan distance, `|dx| + |dy|`.
    pub const fn manhattan(self, other: Self) -> Coord {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn step(self, direction: Direction) -> Self {
        self + direction.offset()
    }

    /// Cardinal neighbours in [`Direction::ALL`] order, unfiltered.
    pub fn cardinal_neighbors(self) -> CardinalIter {
        CardinalIter::new(self)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order, also the tie-break order of path search.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn offset(self) -> Position {
        match self {
            Self::Up => Position::new(0, -1),
            Self::Down => Position::new(0, 1),
            Self::Left => Position::new(-1, 0),
            Self::Right => Position::new(1, 0),
        }
    }

    /// Direction of a single cardinal step from `from` to `to`, if it is one.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| from.step(*dir) == to)
    }
}

/// Axis-aligned rectangle of playable cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Position,
    pub width: Coord,
    pub height: Coord,
}

impl Bounds {
    pub const fn new(origin: Position, width: Coord, height: Coord) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub const fn min_x(&self) -> Coord {
        self.origin.x
    }

    pub const fn max_x(&self) -> Coord {
        self.origin.x + self.width - 1
    }

    pub const fn min_y(&self) -> Coord {
        self.origin.y
    }

    pub const fn max_y(&self) -> Coord {
        self.origin.y + self.height - 1
    }

    pub const fn area(&self) -> CellCount {
        let area = self.width.saturating_mul(self.height);
        if area <= 0 {
            0
        } else if area > CellCount::MAX as Coord {
            CellCount::MAX
        } else {
            area as CellCount
        }
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min_x() && pos.x <= self.max_x() && pos.y >= self.min_y() && pos.y <= self.max_y()
    }

    /// Cells on the outermost ring of the rectangle.
    pub const fn is_border(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.x == self.min_x()
                || pos.x == self.max_x()
                || pos.y == self.min_y()
                || pos.y == self.max_y())
    }

    /// Row-major iteration over every contained cell.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let bounds = *self;
        (bounds.min_y()..=bounds.max_y())
            .flat_map(move |y| (bounds.min_x()..=bounds.max_x()).map(move |x| Position::new(x, y)))
    }

    /// Zero-based `[row, col]` index for grid storage, `None` when out of bounds.
    pub fn to_nd_index(&self, pos: Position) -> Option<[usize; 2]> {
        if !self.contains(pos) {
            return None;
        }
        Some([
            (pos.y - self.origin.y) as usize,
            (pos.x - self.origin.x) as usize,
        ])
    }

    pub fn nd_shape(&self) -> [usize; 2] {
        [self.height.max(0) as usize, self.width.max(0) as usize]
    }
}

#[derive(Debug)]
pub struct CardinalIter {
    center: Position,
    index: u8,
}

impl CardinalIter {
    fn new(center: Position) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for CardinalIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let direction = *Direction::ALL.get(usize::from(self.index))?;
        self.index += 1;
        Some(self.center.step(direction))
    }
}
