use super::direction::Direction;
use serde::Deserialize;
use std::fmt;

/// A cell on the grid.  Positions are unbounded; whether a position is on the
/// board is up to [`Board`][super::Board].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the neighbouring cell in `direction`
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Position {
        Position { x, y }
    }
}
