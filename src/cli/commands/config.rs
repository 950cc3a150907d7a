//! Configuration commands.

use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::LapseError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn config(
    config: &Config,
    paths: &Paths,
    cmd: Option<ConfigCommands>,
    format: OutputFormat,
) -> Result<String, LapseError> {
    match cmd {
        None | Some(ConfigCommands::Show) => match format {
            OutputFormat::Json => to_json(config),
            OutputFormat::Pretty => Ok(config.to_yaml()?.trim_end().to_string()),
        },
        Some(ConfigCommands::Path) => match format {
            OutputFormat::Json => to_json(&json!({
                "root": paths.root,
                "config": paths.config_file,
                "database": paths.database,
                "log": paths.log_file,
            })),
            OutputFormat::Pretty => Ok([
                format!("root:     {}", paths.root.display()),
                format!("config:   {}", paths.config_file.display()),
                format!("database: {}", paths.database.display()),
                format!("log:      {}", paths.log_file.display()),
            ]
            .join("\n")),
        },
    }
}
