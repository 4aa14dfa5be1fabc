mod board;
mod direction;
mod food;
mod position;
mod snake;
pub use self::board::{Board, BoardError};
pub use self::direction::Direction;
pub use self::food::Food;
pub use self::position::Position;
pub use self::snake::{Snake, SnakeSpawn, Step};
use log::{debug, info, trace};
use std::collections::VecDeque;

/// Everything needed to start a run
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GameSettings {
    pub board: Board,
    pub spawn: SnakeSpawn,
}

/// The snake game state machine.
///
/// The engine never schedules itself: something else (normally a
/// [`TickScheduler`][crate::scheduler::TickScheduler]) calls
/// [`tick()`][GameEngine::tick] once per period until the run is over.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEngine<R = rand::rngs::StdRng> {
    rng: R,
    board: Board,
    spawn: SnakeSpawn,
    snake: Snake,
    food: Food,
    score: u32,
    state: GameState,
    /// Direction requested since the last tick, applied at the start of the
    /// next one
    pending: Option<Direction>,
}

impl<R: rand::Rng> GameEngine<R> {
    /// Start a new run with a fresh snake & food
    pub fn new(settings: GameSettings, mut rng: R) -> GameEngine<R> {
        let food = Food::random(settings.board, &mut rng);
        GameEngine {
            rng,
            board: settings.board,
            spawn: settings.spawn,
            snake: Snake::new(settings.spawn),
            food,
            score: 0,
            state: GameState::Running,
            pending: None,
        }
    }

    /// Advance the game by one step: turn, move, eat, then check for
    /// collisions.  Once the game is over, this does nothing and returns
    /// [`TickOutcome::Halted`] until [`restart()`][GameEngine::restart] is
    /// called.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Halted;
        }
        if let Some(direction) = self.pending.take() {
            if !self.snake.set_direction(direction) {
                trace!(
                    "Ignoring request to reverse from {} to {direction}",
                    self.snake.direction()
                );
            }
        }
        let step = self.snake.advance(self.food.position());
        if step.grew {
            self.score = self.score.saturating_add(1);
            self.food.spawn(self.board, &mut self.rng);
            debug!(
                "Ate food at {}; score is now {}, next food at {}",
                step.head,
                self.score,
                self.food.position()
            );
        }
        let collision = if self.snake.is_colliding_with_wall(self.board) {
            Some(Collision::Wall)
        } else if self.snake.is_colliding_with_self() {
            Some(Collision::Body)
        } else {
            None
        };
        let Some(collision) = collision else {
            return TickOutcome::Moved { grew: step.grew };
        };
        self.state = GameState::GameOver { score: self.score };
        info!(
            "Game over: hit {collision} at {}; final score {}",
            step.head, self.score
        );
        TickOutcome::GameOver(GameOver {
            score: self.score,
            collision,
        })
    }

    /// Abandon the current run, if any, and start a new one
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.spawn);
        self.food = Food::random(self.board, &mut self.rng);
        self.score = 0;
        self.state = GameState::Running;
        self.pending = None;
        info!(
            "Starting new run on a {}x{} board",
            self.board.width(),
            self.board.height()
        );
    }
}

impl<R> GameEngine<R> {
    /// Request that the snake turn to face `direction` on the next tick.  If
    /// several requests arrive between two ticks, the last one wins.  A
    /// request to reverse is dropped when the tick applies it, and requests
    /// made after the game is over are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_game_over() {
            trace!("Ignoring turn to {direction} after game over");
        } else {
            self.pending = Some(direction);
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver { .. })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food.position()
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Return everything a renderer needs to draw the current state
    pub fn view(&self) -> View<'_> {
        View {
            body: self.snake.body(),
            food: self.food.position(),
            score: self.score,
            board: self.board,
            state: self.state,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameState {
    Running,
    GameOver { score: u32 },
}

/// What happened during a call to [`GameEngine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved and the run continues
    Moved { grew: bool },

    /// The snake collided and the run has just ended.  This is returned
    /// exactly once per run.
    GameOver(GameOver),

    /// The run had already ended; nothing changed.
    Halted,
}

/// Final report of a run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GameOver {
    pub score: u32,
    pub collision: Collision,
}

/// What the snake's head ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collision {
    Wall,
    Body,
}

impl std::fmt::Display for Collision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collision::Wall => f.pad("wall"),
            Collision::Body => f.pad("own body"),
        }
    }
}

/// A read-only snapshot of the game for drawing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct View<'a> {
    /// Snake cells, head first
    pub body: &'a VecDeque<Position>,
    pub food: Position,
    pub score: u32,
    pub board: Board,
    pub state: GameState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn engine(width: i32, height: i32) -> GameEngine<ChaCha12Rng> {
        let settings = GameSettings {
            board: Board::new(width, height).unwrap(),
            spawn: SnakeSpawn::default(),
        };
        GameEngine::new(settings, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
        Snake::from_segments(cells.iter().copied().map(Position::from), direction).unwrap()
    }

    #[test]
    fn new_game() {
        let game = engine(20, 20);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake(), &Snake::new(SnakeSpawn::default()));
        assert!(game.board().contains(game.food()));
    }

    #[test]
    fn straight_run_and_eat() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(5, 4));
        assert_eq!(game.tick(), TickOutcome::Moved { grew: true });
        assert_eq!(game.snake().head(), Position::new(5, 4));
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 6);
        assert_ne!(game.food(), Position::new(5, 4));
        assert_eq!(game.state(), GameState::Running);
    }

    /// An RNG whose every draw lands at the low end of the range
    #[derive(Clone, Debug, Eq, PartialEq)]
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn eating_with_constant_rng() {
        let mut game = GameEngine::new(GameSettings::default(), ZeroRng);
        assert_eq!(game.food(), Position::new(0, 0));
        game.snake = snake(&[(1, 0), (2, 0), (3, 0)], Direction::Left);
        assert_eq!(game.tick(), TickOutcome::Moved { grew: true });
        assert_eq!(game.score(), 1);
        assert_eq!(game.food(), Position::new(1, 0));
    }

    #[test]
    fn hitting_wall_ends_game() {
        let mut game = engine(10, 10);
        game.snake = snake(&[(9, 5), (8, 5), (7, 5)], Direction::Right);
        game.food = Food::at(Position::new(0, 0));
        game.score = 3;
        assert_eq!(
            game.tick(),
            TickOutcome::GameOver(GameOver {
                score: 3,
                collision: Collision::Wall
            })
        );
        assert_eq!(game.state(), GameState::GameOver { score: 3 });
        assert!(game.is_game_over());

        let frozen = game.clone();
        for _ in 0..3 {
            assert_eq!(game.tick(), TickOutcome::Halted);
        }
        game.set_direction(Direction::Up);
        assert_eq!(game.tick(), TickOutcome::Halted);
        assert_eq!(game, frozen);

        game.restart();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake(), &Snake::new(SnakeSpawn::default()));
    }

    #[test]
    fn hitting_left_wall_ends_game() {
        let mut game = engine(10, 10);
        game.snake = snake(&[(0, 5), (1, 5), (2, 5)], Direction::Left);
        game.food = Food::at(Position::new(9, 9));
        assert_eq!(
            game.tick(),
            TickOutcome::GameOver(GameOver {
                score: 0,
                collision: Collision::Wall
            })
        );
        assert_eq!(game.snake().head(), Position::new(-1, 5));
    }

    #[test]
    fn hitting_body_ends_game() {
        let mut game = engine(10, 10);
        game.snake = snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Direction::Down);
        game.food = Food::at(Position::new(0, 0));
        assert_eq!(
            game.tick(),
            TickOutcome::GameOver(GameOver {
                score: 0,
                collision: Collision::Body
            })
        );
    }

    #[test]
    fn food_on_body_is_permitted() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(5, 7));
        assert_eq!(game.tick(), TickOutcome::Moved { grew: false });
        assert_eq!(game.food(), Position::new(5, 7));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn eating_food_on_tail_ends_game_with_point() {
        let mut game = engine(10, 10);
        game.snake = snake(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down);
        game.food = Food::at(Position::new(5, 6));
        assert_eq!(
            game.tick(),
            TickOutcome::GameOver(GameOver {
                score: 1,
                collision: Collision::Body
            })
        );
    }

    #[test]
    fn turn_applies_on_next_tick() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(0, 0));
        game.set_direction(Direction::Left);
        assert_eq!(game.snake().direction(), Direction::Up);
        assert_eq!(game.tick(), TickOutcome::Moved { grew: false });
        assert_eq!(game.snake().direction(), Direction::Left);
        assert_eq!(game.snake().head(), Position::new(4, 5));
    }

    #[test]
    fn last_turn_request_wins() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(0, 0));
        game.set_direction(Direction::Left);
        game.set_direction(Direction::Right);
        let _ = game.tick();
        assert_eq!(game.snake().direction(), Direction::Right);
        assert_eq!(game.snake().head(), Position::new(6, 5));
    }

    #[test]
    fn reversal_request_is_dropped() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(0, 0));
        game.set_direction(Direction::Down);
        assert_eq!(game.tick(), TickOutcome::Moved { grew: false });
        assert_eq!(game.snake().direction(), Direction::Up);
        assert_eq!(game.snake().head(), Position::new(5, 4));
        // The rejected request is not retried on later ticks
        assert_eq!(game.pending, None);
    }

    #[test]
    fn restart_mid_run() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(5, 4));
        let _ = game.tick();
        game.set_direction(Direction::Left);
        assert_eq!(game.score(), 1);
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.pending, None);
        assert_eq!(game.snake().len(), 5);
    }

    #[test]
    fn view_reflects_state() {
        let mut game = engine(20, 20);
        game.food = Food::at(Position::new(5, 4));
        let _ = game.tick();
        let view = game.view();
        assert_eq!(view.body.front(), Some(&Position::new(5, 4)));
        assert_eq!(view.body.len(), 6);
        assert_eq!(view.food, game.food());
        assert_eq!(view.score, 1);
        assert_eq!(view.board, Board::new(20, 20).unwrap());
        assert_eq!(view.state, GameState::Running);
    }

    /// Play many random runs and check the per-tick invariants: growth by
    /// exactly one on eating, constant length otherwise, a score that never
    /// decreases, no instant reversal, and a zero score after every restart.
    #[test]
    fn random_play_invariants() {
        let mut game = engine(8, 12);
        let mut player = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut runs = 0;
        let mut meals = 0;
        for _ in 0..5000 {
            if player.random_bool(0.4) {
                game.set_direction(directions[player.random_range(0..4)]);
            }
            let food_before = game.food();
            let len_before = game.snake().len();
            let score_before = game.score();
            let direction_before = game.snake().direction();
            let outcome = game.tick();
            assert_ne!(game.snake().direction(), direction_before.opposite());
            if game.snake().head() == food_before {
                meals += 1;
                assert_eq!(game.snake().len(), len_before + 1);
                assert_eq!(game.score(), score_before + 1);
            } else {
                assert_eq!(game.snake().len(), len_before);
                assert_eq!(game.score(), score_before);
            }
            if let TickOutcome::GameOver(over) = outcome {
                assert_eq!(over.score, game.score());
                runs += 1;
                game.restart();
                assert_eq!(game.score(), 0);
            }
        }
        assert!(runs > 0);
        assert!(meals > 0);
    }
}
