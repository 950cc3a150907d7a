//! Storage layer for lapse.
//!
//! Session history and preferences live in a key-value store backed by
//! `SQLite`.

mod database;
mod kv;
mod migrations;

pub use database::Database;
#[cfg(test)]
pub use kv::MockKeyValueStore;
pub use kv::{KeyValueStore, MemoryStore};
