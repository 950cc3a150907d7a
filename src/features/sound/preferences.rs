//! Persisted sound preferences.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::options::{AudioOption, FadeoutOption};
use crate::error::LapseError;
use crate::storage::KeyValueStore;

/// Storage key for the selected audio option.
pub const AUDIO_KEY: &str = "selectedAudioOption";
/// Storage key for the selected fade-out option.
pub const FADEOUT_KEY: &str = "selectedFadeoutOption";

/// The user's sound choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Background sound.
    pub audio: AudioOption,
    /// Fade-out threshold.
    pub fadeout: FadeoutOption,
}

impl Preferences {
    /// Load preferences, falling back to defaults for anything missing or
    /// unreadable.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        Self {
            audio: read_or_default(storage, AUDIO_KEY),
            fadeout: read_or_default(storage, FADEOUT_KEY),
        }
    }

    /// Persist both selections.
    ///
    /// # Errors
    ///
    /// Returns an error if either value cannot be written.
    pub fn save(&self, storage: &dyn KeyValueStore) -> Result<(), LapseError> {
        storage.set(AUDIO_KEY, &serde_json::to_string(&self.audio)?)?;
        storage.set(FADEOUT_KEY, &serde_json::to_string(&self.fadeout)?)?;
        tracing::info!(audio = self.audio.key(), fadeout = self.fadeout.key(), "saved preferences");
        Ok(())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(storage: &dyn KeyValueStore, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "ignoring unreadable preference");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference");
            T::default()
        }
    }
}
