//! Playback cue for the background sound.
//!
//! Tracks what an audio player should be doing (which sound, whether it is
//! playing, at what volume) from timer events. Nothing here feeds back into
//! the timer.

use chrono::Duration;

use super::options::{AudioOption, FadeoutOption};
use super::preferences::Preferences;
use crate::features::stopwatch::TimerEvent;

/// How long the fade from full volume to silence takes once it begins.
pub const FADE_LENGTH: Duration = Duration::seconds(10);

/// Desired playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCue {
    audio: AudioOption,
    fadeout: FadeoutOption,
    playing: bool,
    volume: f32,
}

impl AudioCue {
    /// Create a stopped cue for the given preferences.
    #[must_use]
    pub const fn new(preferences: Preferences) -> Self {
        Self {
            audio: preferences.audio,
            fadeout: preferences.fadeout,
            playing: false,
            volume: 1.0,
        }
    }

    /// Apply new preferences. Takes effect on the next timer event.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.audio = preferences.audio;
        self.fadeout = preferences.fadeout;
        if self.audio.resource_name().is_none() {
            self.playing = false;
        }
    }

    /// Update from a timer event.
    pub fn handle(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Started { elapsed, .. } | TimerEvent::Tick { elapsed } => {
                self.volume = fade_volume(self.fadeout, *elapsed);
                let audible = self.audio.resource_name().is_some() && self.volume > 0.0;
                if audible != self.playing {
                    tracing::debug!(sound = self.audio.key(), audible, "audio cue changed");
                }
                self.playing = audible;
            }
            TimerEvent::Paused { .. } | TimerEvent::Reset | TimerEvent::Committed(_) => {
                self.playing = false;
                self.volume = 1.0;
            }
        }
    }

    /// Whether sound should currently be playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playback volume in `0.0..=1.0`.
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// The selected sound.
    #[must_use]
    pub const fn audio(&self) -> AudioOption {
        self.audio
    }
}

/// Volume at `elapsed` for a fade-out option.
///
/// Full volume until the threshold, then a linear ramp to silence over
/// [`FADE_LENGTH`].
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn fade_volume(fadeout: FadeoutOption, elapsed: Duration) -> f32 {
    let Some(threshold) = fadeout.threshold() else {
        return 1.0;
    };
    if elapsed <= threshold {
        return 1.0;
    }

    let into_fade = (elapsed - threshold).num_milliseconds() as f64;
    let fade = FADE_LENGTH.num_milliseconds() as f64;
    (1.0 - into_fade / fade).clamp(0.0, 1.0) as f32
}
