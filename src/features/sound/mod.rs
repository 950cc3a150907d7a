//! Background sound settings.
//!
//! Sound output itself is left to the host; this module owns the choices
//! and the playback cue derived from timer events.

pub mod cue;
pub mod options;
pub mod preferences;

pub use cue::{fade_volume, AudioCue};
pub use options::{AudioOption, FadeoutOption};
pub use preferences::{Preferences, AUDIO_KEY, FADEOUT_KEY};
