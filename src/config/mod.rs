//! Configuration management for lapse.
//!
//! This module handles loading configuration from `~/.lapse/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, HistoryConfig, TimerConfig};
