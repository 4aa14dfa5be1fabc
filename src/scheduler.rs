//! Driving a [`GameEngine`] at a fixed tick rate
use crate::consts;
use crate::game::{Direction, GameEngine, TickOutcome};
use crate::observer::Observer;
use log::trace;
use rand::Rng;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// A source of direction requests, typically fed asynchronously by whatever
/// reads the player's controls
pub trait InputSource {
    /// Wait up to `timeout` for the next request
    fn poll(&mut self, timeout: Duration) -> InputEvent;

    /// Throw away any requests that have already arrived.  Used between runs
    /// so that input sent after a game over does not steer the next run.
    fn discard_pending(&mut self) {}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// The player asked to turn
    Turn(Direction),

    /// `timeout` elapsed without a request
    Idle,

    /// No more requests will ever arrive.  The source may return this without
    /// waiting.
    Closed,
}

impl InputSource for Receiver<Direction> {
    fn poll(&mut self, timeout: Duration) -> InputEvent {
        match self.recv_timeout(timeout) {
            Ok(direction) => InputEvent::Turn(direction),
            Err(RecvTimeoutError::Timeout) => InputEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => InputEvent::Closed,
        }
    }

    fn discard_pending(&mut self) {
        let dropped = self.try_iter().count();
        if dropped > 0 {
            trace!("Discarded {dropped} queued turn requests");
        }
    }
}

/// Calls [`GameEngine::tick()`] once per period until the run ends, passing
/// direction requests through to the engine between ticks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickScheduler {
    period: Duration,
}

impl TickScheduler {
    pub fn new(period: Duration) -> TickScheduler {
        TickScheduler { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Play the engine's current run to completion and return its final
    /// score.  `observer` is shown every tick and the end of the run.
    ///
    /// If the run is already over, this returns immediately without ticking;
    /// call [`GameEngine::restart()`] first to play again.
    pub fn run<R, I, O>(
        &self,
        engine: &mut GameEngine<R>,
        input: &mut I,
        observer: &mut O,
    ) -> u32
    where
        R: Rng,
        I: InputSource,
        O: Observer,
    {
        while !engine.is_game_over() {
            match self.wait_and_tick(engine, input) {
                TickOutcome::Moved { .. } => observer.on_tick(&engine.view()),
                TickOutcome::GameOver(summary) => observer.on_game_over(summary),
                TickOutcome::Halted => break,
            }
        }
        engine.score()
    }

    /// Wait until the next tick is due, forwarding input to the engine in the
    /// meantime, and then tick
    fn wait_and_tick<R: Rng, I: InputSource>(
        &self,
        engine: &mut GameEngine<R>,
        input: &mut I,
    ) -> TickOutcome {
        let when = Instant::now() + self.period;
        loop {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() {
                break;
            }
            match input.poll(wait) {
                InputEvent::Turn(direction) => {
                    trace!("Received turn to {direction}");
                    engine.set_direction(direction);
                }
                InputEvent::Idle => break,
                InputEvent::Closed => {
                    std::thread::sleep(wait);
                    break;
                }
            }
        }
        engine.tick()
    }
}

impl Default for TickScheduler {
    fn default() -> TickScheduler {
        TickScheduler::new(consts::TICK_PERIOD)
    }
}
