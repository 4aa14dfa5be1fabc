use super::board::Board;
use super::position::Position;
use rand::Rng;

/// The single piece of food on the board.
///
/// Food placement does not look at the snake, so food may land on a cell the
/// snake occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Food {
        Food { position }
    }

    /// Place food on a uniformly random cell of `board`
    pub fn random<R: Rng>(board: Board, rng: &mut R) -> Food {
        Food {
            position: board.random_position(rng),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a uniformly random cell of `board` other than the one
    /// it currently occupies.  On a single-cell board, or if the food is not
    /// on `board`, any cell may be chosen.
    pub fn spawn<R: Rng>(&mut self, board: Board, rng: &mut R) {
        let Some(current) = board.index_of(self.position) else {
            self.position = board.random_position(rng);
            return;
        };
        let area = board.area();
        if area < 2 {
            self.position = board.random_position(rng);
            return;
        }
        // Draw from every cell but one, then skip over the current cell.
        let mut index = rng.random_range(0..area - 1);
        if index >= current {
            index += 1;
        }
        if let Some(pos) = board.position_at(index) {
            self.position = pos;
        }
    }
}
