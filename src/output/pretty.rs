use colored::Colorize;

use crate::features::history::{DayGroup, TimerSession};
use crate::features::sound::{AudioOption, FadeoutOption, Preferences};
use crate::features::stopwatch::{format_duration_short, format_hms};

const NO_DESCRIPTION: &str = "(no description)";

fn description_or_placeholder(description: &str) -> String {
    if description.is_empty() {
        NO_DESCRIPTION.dimmed().to_string()
    } else {
        description.to_string()
    }
}

/// Format history grouped by day and description.
pub fn format_history_grouped_pretty(days: &[DayGroup]) -> String {
    if days.is_empty() {
        return "No sessions recorded yet.\n\nStart the timer with: lapse".to_string();
    }

    let mut output = Vec::new();
    for day in days {
        let count = day.session_count();
        output.push(format!(
            "{}  {}  {}",
            day.date.format("%a %Y-%m-%d").to_string().bold(),
            format_hms(day.total()).cyan(),
            format!("({} session{})", count, if count == 1 { "" } else { "s" }).dimmed()
        ));

        for group in &day.descriptions {
            output.push(format!(
                "  {}  {}",
                description_or_placeholder(&group.description),
                format_duration_short(group.total()).cyan()
            ));
            for session in &group.sessions {
                output.push(format!(
                    "    {}  {}-{}  {}",
                    session.short_id().dimmed(),
                    session.start_local().format("%H:%M"),
                    session.end_local().format("%H:%M"),
                    format_hms(session.duration())
                ));
            }
        }
        output.push(String::new());
    }

    output.join("\n").trim_end().to_string()
}

/// Format history as a flat table, newest first.
pub fn format_history_flat_pretty(sessions: &[&TimerSession]) -> String {
    if sessions.is_empty() {
        return "No sessions recorded yet.\n\nStart the timer with: lapse".to_string();
    }

    let mut output = Vec::new();
    output.push(format!(
        "{:<10} {:<17} {:<6} {:<9} {}",
        "Id", "Start", "End", "Duration", "Description"
    ));
    output.push("─".repeat(60));

    for session in sessions {
        let description = if session.description().is_empty() {
            "-".to_string()
        } else if session.description().chars().count() > 24 {
            let cut: String = session.description().chars().take(21).collect();
            format!("{cut}...")
        } else {
            session.description().to_string()
        };

        output.push(format!(
            "{:<10} {:<17} {:<6} {:<9} {}",
            session.short_id(),
            session.start_local().format("%Y-%m-%d %H:%M"),
            session.end_local().format("%H:%M"),
            format_hms(session.duration()),
            description
        ));
    }

    output.join("\n")
}

/// Format a single session in detail.
pub fn format_session_pretty(session: &TimerSession) -> String {
    let lines = [
        format!("{} {}", "Session".bold(), session.id()),
        "─".repeat(40),
        format!("Started:     {}", session.start_local().format("%Y-%m-%d %H:%M:%S")),
        format!("Ended:       {}", session.end_local().format("%Y-%m-%d %H:%M:%S")),
        format!("Duration:    {}", format_hms(session.duration()).cyan()),
        format!("Description: {}", description_or_placeholder(session.description())),
    ];
    lines.join("\n")
}

/// Format sound preferences with the available choices.
pub fn format_preferences_pretty(prefs: &Preferences) -> String {
    let mut output = Vec::new();
    output.push("Sound".bold().to_string());
    output.push(format!("  Audio:    {} ({})", prefs.audio.display_name().cyan(), prefs.audio.key()));
    output.push(format!("  Fade-out: {} ({})", prefs.fadeout.display_name().cyan(), prefs.fadeout.key()));
    output.push(String::new());

    let audio: Vec<&str> = AudioOption::ALL.iter().map(|o| o.key()).collect();
    let fadeout: Vec<&str> = FadeoutOption::ALL.iter().map(|o| o.key()).collect();
    output.push(format!("  Audio options:    {}", audio.join(", ")).dimmed().to_string());
    output.push(format!("  Fade-out options: {}", fadeout.join(", ")).dimmed().to_string());

    output.join("\n")
}
