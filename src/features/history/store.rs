//! Session history persistence.
//!
//! The whole collection lives in memory and is written back to the key-value
//! store as one JSON array after every mutation.

use uuid::Uuid;

use super::session::TimerSession;
use crate::error::LapseError;
use crate::storage::KeyValueStore;

/// Storage key for the serialized session collection.
pub const SESSIONS_KEY: &str = "sessions";

type Listener<'a> = Box<dyn FnMut(&[TimerSession]) + 'a>;

/// Ordered, persisted collection of completed sessions.
///
/// Sessions keep insertion order. Persistence failures are logged and
/// dropped: the in-memory collection stays authoritative for the rest of the
/// process, but the change may be lost on restart.
pub struct SessionStore<'a> {
    storage: &'a dyn KeyValueStore,
    sessions: Vec<TimerSession>,
    listeners: Vec<Listener<'a>>,
}

impl<'a> SessionStore<'a> {
    /// Load the collection from storage.
    ///
    /// Missing or unreadable data yields an empty history. Individual records
    /// that fail validation are skipped.
    pub fn load_all(storage: &'a dyn KeyValueStore) -> Self {
        let sessions = match storage.get(SESSIONS_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session history, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = sessions.len(), "loaded session history");

        Self {
            storage,
            sessions,
            listeners: Vec::new(),
        }
    }

    /// All sessions in insertion order.
    #[must_use]
    pub fn sessions(&self) -> &[TimerSession] {
        &self.sessions
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Look up a session by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&TimerSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Resolve a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::NotFound` if nothing matches and
    /// `LapseError::Parse` if the prefix is ambiguous.
    pub fn find(&self, query: &str) -> Result<&TimerSession, LapseError> {
        let needle: String = query
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        if needle.is_empty() {
            return Err(LapseError::Parse("Session id must not be empty".to_string()));
        }

        let mut matches = self
            .sessions
            .iter()
            .filter(|s| s.id().simple().to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(session), None) => Ok(session),
            (Some(_), Some(_)) => Err(LapseError::Parse(format!(
                "Session id prefix '{query}' is ambiguous"
            ))),
            (None, _) => Err(LapseError::NotFound(format!("session {query}"))),
        }
    }

    /// Sessions ordered by start time, newest first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&TimerSession> {
        let mut sorted: Vec<&TimerSession> = self.sessions.iter().collect();
        sorted.sort_by(|a, b| b.start_time().cmp(&a.start_time()));
        sorted
    }

    /// Append a new session and persist.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidState` if a session with the same id is
    /// already stored.
    pub fn save(&mut self, session: TimerSession) -> Result<(), LapseError> {
        if self.get(session.id()).is_some() {
            return Err(LapseError::InvalidState(format!(
                "session {} already exists",
                session.id()
            )));
        }

        tracing::info!(
            id = %session.id(),
            duration_secs = session.duration_secs(),
            "saving session"
        );
        self.sessions.push(session);
        self.persist();
        Ok(())
    }

    /// Replace the stored session that has the same id.
    ///
    /// Updating with an identical value leaves storage untouched.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::NotFound` if no session has that id; the
    /// collection is left unchanged.
    pub fn update(&mut self, session: TimerSession) -> Result<(), LapseError> {
        let slot = self
            .sessions
            .iter_mut()
            .find(|s| s.id() == session.id())
            .ok_or_else(|| LapseError::NotFound(format!("session {}", session.id())))?;

        if *slot == session {
            tracing::debug!(id = %session.id(), "update is a no-op");
            return Ok(());
        }

        tracing::info!(id = %session.id(), "updating session");
        *slot = session;
        self.persist();
        Ok(())
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id() != id);
        if self.sessions.len() == before {
            return false;
        }

        tracing::info!(%id, "deleted session");
        self.persist();
        true
    }

    /// Remove every session. The storage key is dropped rather than
    /// rewritten as an empty list.
    pub fn clear_all(&mut self) {
        tracing::info!(count = self.sessions.len(), "clearing session history");
        self.sessions.clear();
        if let Err(e) = self.storage.remove(SESSIONS_KEY) {
            tracing::error!(error = %e, "failed to clear session history");
        }
        self.notify();
    }

    /// Register a callback invoked with the full collection after each
    /// mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[TimerSession]) + 'a) {
        self.listeners.push(Box::new(listener));
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.sessions) {
            Ok(json) => {
                if let Err(e) = self.storage.set(SESSIONS_KEY, &json) {
                    tracing::error!(error = %e, "failed to persist session history");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize session history"),
        }

        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.sessions);
        }
    }
}

fn decode(raw: &str) -> Vec<TimerSession> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "session history is corrupt, starting empty");
            return Vec::new();
        }
    };

    let mut sessions: Vec<TimerSession> = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<TimerSession>(record) {
            Ok(session) if sessions.iter().any(|s| s.id() == session.id()) => {
                tracing::warn!(id = %session.id(), "skipping duplicate session record");
            }
            Ok(session) => sessions.push(session),
            Err(e) => tracing::warn!(error = %e, "skipping invalid session record"),
        }
    }
    sessions
}
