//! Core abstractions for lapse.
//!
//! This module provides the clock abstraction and argument parsing helpers
//! shared across features.

mod clock;
mod datetime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use datetime::{parse_datetime, parse_duration};
