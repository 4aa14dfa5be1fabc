use super::position::Position;
use crate::consts;
use rand::Rng;
use thiserror::Error;

/// The fixed-size grid that a run is played on.  Valid cells are
/// `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    /// Create a board `width` cells wide and `height` cells tall.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either dimension is zero or negative.
    pub fn new(width: i32, height: i32) -> Result<Board, BoardError> {
        if width > 0 && height > 0 {
            Ok(Board { width, height })
        } else {
            Err(BoardError::Empty { width, height })
        }
    }

    /// Create a board covering a play surface of the given pixel dimensions
    /// divided into square cells `cell_size` pixels wide.  Partial cells at
    /// the right & bottom edges are discarded.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cell_size` is zero, if the resulting board would not
    /// fit in `i32` coordinates, or if the surface is smaller than one cell.
    pub fn from_pixels(
        pixel_width: u32,
        pixel_height: u32,
        cell_size: u32,
    ) -> Result<Board, BoardError> {
        if cell_size == 0 {
            return Err(BoardError::ZeroCellSize);
        }
        let cells = |pixels: u32| {
            let n = pixels / cell_size;
            i32::try_from(n).map_err(|_| BoardError::TooLarge(n))
        };
        Board::new(cells(pixel_width)?, cells(pixel_height)?)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the board
    pub fn area(&self) -> u64 {
        u64::from(self.width.unsigned_abs()) * u64::from(self.height.unsigned_abs())
    }

    /// Test whether `pos` lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Number cells row by row, starting from zero at the top-left corner.
    /// Returns `None` if `pos` is off the board.
    pub fn index_of(&self, pos: Position) -> Option<u64> {
        if !self.contains(pos) {
            return None;
        }
        let x = u64::try_from(pos.x).ok()?;
        let y = u64::try_from(pos.y).ok()?;
        Some(y * u64::from(self.width.unsigned_abs()) + x)
    }

    /// Inverse of [`index_of()`][Board::index_of]
    pub fn position_at(&self, index: u64) -> Option<Position> {
        if index >= self.area() {
            return None;
        }
        let width = u64::from(self.width.unsigned_abs());
        Some(Position::new(
            i32::try_from(index % width).ok()?,
            i32::try_from(index / width).ok()?,
        ))
    }

    /// Choose a cell of the board uniformly at random
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}

impl Default for Board {
    fn default() -> Board {
        Board {
            width: consts::BOARD_WIDTH,
            height: consts::BOARD_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum BoardError {
    #[error("board must be at least one cell in each dimension, got {width}x{height}")]
    Empty { width: i32, height: i32 },
    #[error("cell size must be nonzero")]
    ZeroCellSize,
    #[error("board dimension of {0} cells is too large")]
    TooLarge(u32),
}
