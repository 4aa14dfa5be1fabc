use super::board::Board;
use super::direction::Direction;
use super::position::Position;
use crate::consts;
use serde::Deserialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Snake state.  Snate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    /// The cells occupied by the snake, head first and tail last
    body: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    direction: Direction,
}

impl Snake {
    /// Create a snake laid out in a straight line as described by `spawn`:
    /// the head at `spawn.head`, facing `spawn.direction`, with the rest of
    /// the body trailing behind it.
    pub fn new(spawn: SnakeSpawn) -> Snake {
        Snake {
            body: spawn.positions().collect(),
            direction: spawn.direction,
        }
    }

    /// Create a snake from explicit body segments, head first.  Returns
    /// `None` if `segments` is empty.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Option<Snake>
    where
        I: IntoIterator<Item = Position>,
    {
        let body = segments.into_iter().collect::<VecDeque<_>>();
        (!body.is_empty()).then_some(Snake { body, direction })
    }

    /// Return the position of the snake's head
    pub fn head(&self) -> Position {
        // Every constructor rejects an empty body, and `advance()` pushes
        // before it pops.
        self.body[0]
    }

    /// Return the position of the end of the snake's tail
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_else(|| self.head())
    }

    /// Return all cells occupied by the snake, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn the snake to face `direction`.  A request to reverse straight
    /// back into the neck is ignored.  Returns whether the direction was
    /// applied.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Move the snake forwards one cell in its current direction.  If the new
    /// head lands on `food`, the tail is kept in place and the snake grows by
    /// one cell; otherwise the tail is dropped and the length is unchanged.
    pub fn advance(&mut self, food: Position) -> Step {
        let head = self.head().step(self.direction);
        let grew = head == food;
        self.body.push_front(head);
        if !grew {
            let _ = self.body.pop_back();
        }
        Step { head, grew }
    }

    /// Test whether the head has left the board
    pub fn is_colliding_with_wall(&self, board: Board) -> bool {
        !board.contains(self.head())
    }

    /// Test whether the head occupies the same cell as any other segment
    pub fn is_colliding_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }
}

/// The result of [`Snake::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Step {
    /// The snake's new head position
    pub head: Position,

    /// Whether the snake ate and grew by one cell
    pub grew: bool,
}

/// Where and how a fresh snake is placed at the start of a run
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SnakeSpawn {
    pub head: Position,
    pub length: NonZeroUsize,
    pub direction: Direction,
}

impl SnakeSpawn {
    /// The cells of the initial body, head first
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let behind = self.direction.opposite();
        std::iter::successors(Some(self.head), move |&p| Some(p.step(behind)))
            .take(self.length.get())
    }

    /// Test whether the whole initial body lies on `board`
    pub fn fits(self, board: Board) -> bool {
        self.positions().all(|p| board.contains(p))
    }
}

impl Default for SnakeSpawn {
    fn default() -> SnakeSpawn {
        SnakeSpawn {
            head: consts::SNAKE_START,
            length: NonZeroUsize::new(consts::INITIAL_SNAKE_LENGTH).unwrap_or(NonZeroUsize::MIN),
            direction: consts::SNAKE_DIRECTION,
        }
    }
}
