use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "lapse")]
#[command(about = "A stopwatch timer with local session history")]
#[command(long_about = "lapse - a stopwatch timer with local session history

Run without a subcommand to open the interactive timer. Completed sessions
are stored locally and can be listed, edited and logged from the command line.

QUICK START:
  lapse                                   Open the timer
  lapse history                           Sessions grouped by day
  lapse log --start 09:00 --duration 25m  Record a session by hand
  lapse edit 3f2a --description \"review\"  Change a session

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.lapse (override with LAPSE_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from config.yaml.
    #[arg(short, long, value_enum, global = true, env = "LAPSE_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// Log at debug level (overridden by LAPSE_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys: space start/pause, s save, r reset, tab switch view, q quit.
    Tui,

    /// List recorded sessions
    ///
    /// Sessions are grouped by local day and description, newest first.
    ///
    /// # Examples
    ///
    ///   lapse history
    ///   lapse history --limit 5 --flat
    ///   lapse history -o json
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show one session
    Show {
        /// Session id or unique id prefix
        id: String,
    },

    /// Record a session manually
    ///
    /// # Examples
    ///
    ///   lapse log --start 09:00 --end 09:25
    ///   lapse log --start "2024-03-01 14:00" --duration 1h30m -d "writing"
    Log(LogArgs),

    /// Edit a session's times or description
    ///
    /// Times given as HH:MM are taken on the session's start date.
    Edit(EditArgs),

    /// Delete a session
    #[command(alias = "rm")]
    Delete {
        /// Session id or unique id prefix
        id: String,
    },

    /// Delete every session
    Clear {
        /// Required to actually delete
        #[arg(long)]
        force: bool,
    },

    /// Show or change sound settings
    Settings(SettingsArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    ///   lapse completions zsh > ~/.zfunc/_lapse
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Maximum number of sessions (defaults to `history.default_limit`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// List sessions without grouping
    #[arg(long)]
    pub flat: bool,
}

#[derive(Args)]
pub struct LogArgs {
    /// Start time (RFC 3339, "YYYY-MM-DD HH:MM" or "HH:MM")
    #[arg(short, long)]
    pub start: String,

    /// End time
    #[arg(short, long, conflicts_with = "duration", required_unless_present = "duration")]
    pub end: Option<String>,

    /// Length instead of an end time (90, 25m, 1h30m, 45s)
    #[arg(long)]
    pub duration: Option<String>,

    /// What the session was for
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Session id or unique id prefix
    pub id: String,

    /// New start time
    #[arg(short, long)]
    pub start: Option<String>,

    /// New end time
    #[arg(short, long)]
    pub end: Option<String>,

    /// New description (empty string clears it)
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current sound settings (default)
    Show,

    /// Choose background audio (silent, rain, ocean, forest, fireplace, whiteNoise, brownNoise)
    Audio {
        /// Audio option key
        option: String,
    },

    /// Choose when audio fades out (none, 5m, 10m, 15m, 30m, 60m)
    Fadeout {
        /// Fade-out option key
        option: String,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (default)
    Show,
    /// Print resolved file locations
    Path,
}
