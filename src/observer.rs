//! Receiving game updates from a [`TickScheduler`][crate::scheduler::TickScheduler]
use crate::game::{GameOver, Position, View};
use log::{debug, info};
use std::sync::mpsc::Sender;

/// Something that wants to see the game as it is played
pub trait Observer {
    /// Called after every tick on which the run continued
    fn on_tick(&mut self, view: &View<'_>);

    /// Called once per run, on the tick on which the run ended
    fn on_game_over(&mut self, summary: GameOver);
}

/// An observer that writes each frame and the final result to the log
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LogObserver {
    ticks: u64,
}

impl LogObserver {
    pub fn new() -> LogObserver {
        LogObserver::default()
    }

    /// Number of ticks seen in the current run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Observer for LogObserver {
    fn on_tick(&mut self, view: &View<'_>) {
        self.ticks += 1;
        if let Some(head) = view.body.front() {
            debug!(
                "Tick {}: head at {head}, length {}, food at {}, score {}",
                self.ticks,
                view.body.len(),
                view.food,
                view.score
            );
        }
    }

    fn on_game_over(&mut self, summary: GameOver) {
        self.ticks += 1;
        info!(
            "Run ended after {} ticks: hit {}, scored {}",
            self.ticks, summary.collision, summary.score
        );
        self.ticks = 0;
    }
}

/// An owned copy of what an [`Observer`] is shown, for sending across threads
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameEvent {
    /// A tick on which the run continued
    Tick {
        body: Vec<Position>,
        food: Position,
        score: u32,
    },
    GameOver(GameOver),
}

/// An observer that forwards every update down a channel.  Updates sent
/// after the receiving end has hung up are discarded.
#[derive(Clone, Debug)]
pub struct EventSender(Sender<GameEvent>);

impl EventSender {
    pub fn new(sender: Sender<GameEvent>) -> EventSender {
        EventSender(sender)
    }
}

impl Observer for EventSender {
    fn on_tick(&mut self, view: &View<'_>) {
        let _ = self.0.send(GameEvent::Tick {
            body: view.body.iter().copied().collect(),
            food: view.food,
            score: view.score,
        });
    }

    fn on_game_over(&mut self, summary: GameOver) {
        let _ = self.0.send(GameEvent::GameOver(summary));
    }
}
