//! A grid-based snake game engine.
//!
//! [`game::GameEngine`] is a synchronous state machine that advances one step
//! per call to `tick()`.  [`scheduler::TickScheduler`] calls it at a fixed
//! rate, feeding it direction requests from an [`scheduler::InputSource`]
//! and reporting each step to an [`observer::Observer`].
pub mod config;
pub mod consts;
pub mod game;
pub mod observer;
pub mod scheduler;
