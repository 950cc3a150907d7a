//! Sound settings command.

use colored::Colorize;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::LapseError;
use crate::features::sound::{AudioOption, FadeoutOption, Preferences};
use crate::output::format_preferences;
use crate::storage::KeyValueStore;

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns `LapseError::Parse` for unknown option keys, or a storage error if
/// the choice cannot be saved.
pub fn settings(
    storage: &dyn KeyValueStore,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let mut prefs = Preferences::load(storage);

    let changed = match cmd {
        None | Some(SettingsCommands::Show) => return format_preferences(&prefs, format),
        Some(SettingsCommands::Audio { option }) => {
            prefs.audio = AudioOption::parse(&option).ok_or_else(|| {
                LapseError::Parse(format!("Unknown audio option '{option}'"))
            })?;
            format!("Audio set to {}", prefs.audio.display_name())
        }
        Some(SettingsCommands::Fadeout { option }) => {
            prefs.fadeout = FadeoutOption::parse(&option).ok_or_else(|| {
                LapseError::Parse(format!("Unknown fade-out option '{option}'"))
            })?;
            format!("Fade-out set to {}", prefs.fadeout.display_name())
        }
    };

    prefs.save(storage)?;

    match format {
        OutputFormat::Json => format_preferences(&prefs, format),
        OutputFormat::Pretty => Ok(format!("{} {changed}", "✓".green())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_audio_persists() {
        let storage = MemoryStore::new();
        settings(
            &storage,
            Some(SettingsCommands::Audio {
                option: "rain".to_string(),
            }),
            OutputFormat::Pretty,
        )
        .unwrap();

        assert_eq!(Preferences::load(&storage).audio, AudioOption::Rain);
    }

    #[test]
    fn test_set_fadeout_persists() {
        let storage = MemoryStore::new();
        settings(
            &storage,
            Some(SettingsCommands::Fadeout {
                option: "15m".to_string(),
            }),
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(Preferences::load(&storage).fadeout, FadeoutOption::FifteenMinutes);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let storage = MemoryStore::new();
        let err = settings(
            &storage,
            Some(SettingsCommands::Audio {
                option: "thunder".to_string(),
            }),
            OutputFormat::Pretty,
        )
        .unwrap_err();

        assert!(matches!(err, LapseError::Parse(_)));
        assert_eq!(Preferences::load(&storage), Preferences::default());
    }
}
