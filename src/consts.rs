//! Assorted constants & hard-coded defaults
use crate::game::{Direction, Position};
use std::time::Duration;

/// Time between movements of the snake
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Default board width in cells
pub const BOARD_WIDTH: i32 = 20;

/// Default board height in cells
pub const BOARD_HEIGHT: i32 = 20;

/// Size in pixels of one square cell when a board is sized from a pixel
/// surface
pub const CELL_SIZE: u32 = 100;

/// Where the snake's head starts
pub const SNAKE_START: Position = Position::new(5, 5);

/// Snake length at the start of a run
pub const INITIAL_SNAKE_LENGTH: usize = 5;

/// Direction the snake faces at the start of a run.  The rest of the body
/// trails behind the head in the opposite direction.
pub const SNAKE_DIRECTION: Direction = Direction::Up;
