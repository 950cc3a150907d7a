//! Command implementations for lapse.
//!
//! Each command returns the text to print; `main` owns stdout.

mod completions;
mod config;
mod history;
mod session;
mod settings;

pub use completions::completions;
pub use config::config;
pub use history::{history, show};
pub use session::{clear, delete, edit, log};
pub use settings::settings;
