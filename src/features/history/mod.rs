//! Session history.
//!
//! - Completed session records
//! - Persistent, ordered session store
//! - Grouping by day and description

pub mod grouping;
pub mod session;
pub mod store;

pub use grouping::{group_sessions, DayGroup, DescriptionGroup};
pub use session::TimerSession;
pub use store::{SessionStore, SESSIONS_KEY};
