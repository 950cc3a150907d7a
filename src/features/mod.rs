//! Feature implementations for lapse.
//!
//! - Stopwatch timer
//! - Session history
//! - Sound preferences

pub mod history;
pub mod sound;
pub mod stopwatch;
