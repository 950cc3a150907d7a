//! Audio and fade-out choices.
//!
//! Each enum has one mapping table; every per-variant property is read from
//! it.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Background sound played while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioOption {
    /// No sound.
    #[default]
    Silent,
    /// Steady rain.
    Rain,
    /// Ocean waves.
    Ocean,
    /// Forest ambience.
    Forest,
    /// Crackling fireplace.
    Fireplace,
    /// White noise.
    WhiteNoise,
    /// Brown noise.
    BrownNoise,
}

struct AudioEntry {
    option: AudioOption,
    key: &'static str,
    display_name: &'static str,
    resource: Option<&'static str>,
}

/// Ordered to match the enum's declaration order.
static AUDIO_TABLE: [AudioEntry; 7] = [
    AudioEntry { option: AudioOption::Silent, key: "silent", display_name: "Silent", resource: None },
    AudioEntry { option: AudioOption::Rain, key: "rain", display_name: "Rain", resource: Some("rain.m4a") },
    AudioEntry { option: AudioOption::Ocean, key: "ocean", display_name: "Ocean Waves", resource: Some("ocean.m4a") },
    AudioEntry { option: AudioOption::Forest, key: "forest", display_name: "Forest", resource: Some("forest.m4a") },
    AudioEntry { option: AudioOption::Fireplace, key: "fireplace", display_name: "Fireplace", resource: Some("fireplace.m4a") },
    AudioEntry { option: AudioOption::WhiteNoise, key: "whiteNoise", display_name: "White Noise", resource: Some("white_noise.m4a") },
    AudioEntry { option: AudioOption::BrownNoise, key: "brownNoise", display_name: "Brown Noise", resource: Some("brown_noise.m4a") },
];

impl AudioOption {
    /// Every option, in display order.
    pub const ALL: [Self; 7] = [
        Self::Silent,
        Self::Rain,
        Self::Ocean,
        Self::Forest,
        Self::Fireplace,
        Self::WhiteNoise,
        Self::BrownNoise,
    ];

    fn entry(self) -> &'static AudioEntry {
        &AUDIO_TABLE[self as usize]
    }

    /// Stable storage key (also the serialized form).
    #[must_use]
    pub fn key(self) -> &'static str {
        self.entry().key
    }

    /// Name shown to the user.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    /// Sound resource to loop, or `None` for silence.
    #[must_use]
    pub fn resource_name(self) -> Option<&'static str> {
        self.entry().resource
    }

    /// Parse a key or display name, ignoring case, spaces, `-` and `_`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        AUDIO_TABLE
            .iter()
            .find(|e| normalize(e.key) == wanted || normalize(e.display_name) == wanted)
            .map(|e| e.option)
    }

    /// The next option, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// The previous option, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for AudioOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// When background sound fades out, measured in elapsed timer time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FadeoutOption {
    /// Never fade.
    #[default]
    #[serde(rename = "none")]
    Never,
    /// Fade after 5 minutes.
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Fade after 10 minutes.
    #[serde(rename = "10m")]
    TenMinutes,
    /// Fade after 15 minutes.
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// Fade after 30 minutes.
    #[serde(rename = "30m")]
    ThirtyMinutes,
    /// Fade after 1 hour.
    #[serde(rename = "60m")]
    OneHour,
}

struct FadeoutEntry {
    option: FadeoutOption,
    key: &'static str,
    display_name: &'static str,
    minutes: Option<i64>,
}

/// Ordered to match the enum's declaration order.
static FADEOUT_TABLE: [FadeoutEntry; 6] = [
    FadeoutEntry { option: FadeoutOption::Never, key: "none", display_name: "None", minutes: None },
    FadeoutEntry { option: FadeoutOption::FiveMinutes, key: "5m", display_name: "5 minutes", minutes: Some(5) },
    FadeoutEntry { option: FadeoutOption::TenMinutes, key: "10m", display_name: "10 minutes", minutes: Some(10) },
    FadeoutEntry { option: FadeoutOption::FifteenMinutes, key: "15m", display_name: "15 minutes", minutes: Some(15) },
    FadeoutEntry { option: FadeoutOption::ThirtyMinutes, key: "30m", display_name: "30 minutes", minutes: Some(30) },
    FadeoutEntry { option: FadeoutOption::OneHour, key: "60m", display_name: "1 hour", minutes: Some(60) },
];

impl FadeoutOption {
    /// Every option, in display order.
    pub const ALL: [Self; 6] = [
        Self::Never,
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
    ];

    fn entry(self) -> &'static FadeoutEntry {
        &FADEOUT_TABLE[self as usize]
    }

    /// Stable storage key (also the serialized form).
    #[must_use]
    pub fn key(self) -> &'static str {
        self.entry().key
    }

    /// Name shown to the user.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    /// Elapsed time at which the fade begins, or `None` to never fade.
    #[must_use]
    pub fn threshold(self) -> Option<Duration> {
        self.entry().minutes.map(Duration::minutes)
    }

    /// Parse a key or display name, ignoring case and spaces.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        FADEOUT_TABLE
            .iter()
            .find(|e| normalize(e.key) == wanted || normalize(e.display_name) == wanted)
            .map(|e| e.option)
    }

    /// The next option, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// The previous option, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for FadeoutOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
