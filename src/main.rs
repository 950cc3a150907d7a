use clap::Parser;
use colored::Colorize;

use lapse::cli::args::{Cli, Commands};
use lapse::cli::commands;
use lapse::config::{Config, Paths};
use lapse::error::LapseError;
use lapse::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LapseError> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    lapse::logging::init(&paths.log_file, cli.verbose, &config.general.log_level)?;

    let format = cli.output.unwrap_or(config.general.default_output);
    let db = Database::open_at(&paths.database)?;
    tracing::debug!(db = %paths.database.display(), "opened database");

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            lapse::tui::run(&db, &config)?;
            String::new()
        }
        Commands::History(args) => {
            commands::history(&db, &args, config.history.default_limit, format)?
        }
        Commands::Show { id } => commands::show(&db, &id, format)?,
        Commands::Log(args) => commands::log(&db, args, format)?,
        Commands::Edit(args) => commands::edit(&db, args, format)?,
        Commands::Delete { id } => commands::delete(&db, &id, format)?,
        Commands::Clear { force } => commands::clear(&db, force, format)?,
        Commands::Settings(args) => commands::settings(&db, args.command, format)?,
        Commands::Config(args) => commands::config(&config, &paths, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
