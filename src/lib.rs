//! lapse - a stopwatch timer with local session history
//!
//! The library holds the timer engine, the session store and the sound
//! settings; the `lapse` binary wraps them in a CLI and a terminal UI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::LapseError;
pub use features::history::{SessionStore, TimerSession};
pub use features::stopwatch::{TimerEngine, TimerEvent, TimerState};
pub use storage::{Database, KeyValueStore};
