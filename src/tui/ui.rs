//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::core::Clock;
use crate::features::stopwatch::{format_duration_short, format_hms, TimerState};
use crate::tui::app::{App, Input, SettingsRow, Tab};

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>) {
    // Create layout: tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Timer => render_timer(frame, app, chunks[1]),
        Tab::History => render_history(frame, app, chunks[1]),
        Tab::Settings => render_settings(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn render_tabs<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let titles: Vec<Line<'_>> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" lapse "),
        );

    frame.render_widget(tabs, area);
}

fn render_timer<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let state = app.engine.state();
    let color = match state {
        TimerState::Idle => Color::DarkGray,
        TimerState::Running => Color::Green,
        TimerState::Paused => Color::Yellow,
    };

    let cue = app.cue.borrow();
    let sound = if cue.is_playing() {
        format!("♪ {} ({:.0}%)", cue.audio().display_name(), cue.volume() * 100.0)
    } else {
        format!("{} (silent)", cue.audio().display_name())
    };

    let started = app
        .engine
        .session_start()
        .map(|t| format!("started {}", t.with_timezone(&chrono::Local).format("%H:%M:%S")))
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.readout(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(state.to_string(), Style::default().fg(color))),
        Line::from(Span::styled(started, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(sound, Style::default().fg(Color::Blue))),
    ];

    if let Some(Input::SaveDescription(buffer)) = &app.input {
        lines.push(Line::from(""));
        lines.push(prompt_line("Save as", buffer));
    }

    let timer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(timer, area);
}

fn render_history<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let mut items: Vec<ListItem<'_>> = Vec::new();
    let mut selected_row = None;
    let mut index = 0;

    for day in app.history_groups() {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                day.date.format("%a %Y-%m-%d").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_hms(day.total())),
                Style::default().fg(Color::Cyan),
            ),
        ])));

        for group in day.descriptions {
            let label = if group.description.is_empty() {
                "(no description)".to_string()
            } else {
                group.description.clone()
            };
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("  {label}")),
                Span::styled(
                    format!("  {}", format_duration_short(group.total())),
                    Style::default().fg(Color::Cyan),
                ),
            ])));

            for session in group.sessions {
                let is_selected = index == app.history_selected;
                if is_selected {
                    selected_row = Some(items.len());
                }

                let editing = match &app.input {
                    Some(Input::EditDescription { id, buffer }) if *id == session.id() => {
                        Some(buffer.clone())
                    }
                    _ => None,
                };

                let mut spans = vec![
                    Span::styled(
                        format!("    {}  ", session.short_id()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(
                        "{}-{}  {}",
                        session.start_local().format("%H:%M"),
                        session.end_local().format("%H:%M"),
                        format_hms(session.duration())
                    )),
                ];
                if let Some(buffer) = editing {
                    spans.push(Span::raw("  "));
                    spans.extend(prompt_line("Description", &buffer).spans);
                }

                let style = if is_selected {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                items.push(ListItem::new(Line::from(spans)).style(style));
                index += 1;
            }
        }
    }

    let title = format!(" {} sessions ", app.store.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(selected_row);

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_settings<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let rows = [
        (SettingsRow::Audio, "Audio", app.prefs.audio.display_name()),
        (SettingsRow::Fadeout, "Fade-out", app.prefs.fadeout.display_name()),
    ];

    let items: Vec<ListItem<'_>> = rows
        .into_iter()
        .map(|(row, label, value)| {
            let is_selected = row == app.settings_row;
            let line = Line::from(vec![
                Span::raw(format!("{label:<10}")),
                Span::styled(format!("‹ {value} ›"), Style::default().fg(Color::Cyan)),
            ]);
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Sound "));
    frame.render_widget(list, area);
}

fn prompt_line<'a>(label: &str, buffer: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow)),
        Span::raw(buffer.to_string()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ])
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let status_text = if app.input.is_some() {
        "Enter:confirm | Esc:cancel"
    } else {
        app.status
            .as_deref()
            .unwrap_or("space:start/pause | s:save | r:reset | tab:view | ?:help | q:quit")
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
