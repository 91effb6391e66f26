//! Rendering for the terminal UI. Pure: reads `AppState`, draws widgets.

use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::task::{Priority, Task};

use super::app::{AppState, StatusKind, BANNER_TITLE};

const COLOR_TEXT: Color = Color::Green;
const COLOR_GLOW: Color = Color::LightGreen;
const COLOR_MUTED: Color = Color::DarkGray;
const COLOR_HIGH: Color = Color::Red;
const COLOR_MEDIUM: Color = Color::Yellow;
const COLOR_LOW: Color = Color::Green;
const COLOR_OVERDUE: Color = Color::LightRed;

const COMMAND_WINDOW_HEIGHT: u16 = 12;
const HISTORY_VISIBLE: usize = 8;

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => COLOR_HIGH,
        Priority::Medium => COLOR_MEDIUM,
        Priority::Low => COLOR_LOW,
    }
}

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let mut constraints = vec![
        Constraint::Length(1), // clock
        Constraint::Length(3), // banner
        Constraint::Length(3), // stats
        Constraint::Min(0),    // task list
    ];
    if app.command_mode {
        constraints.push(Constraint::Length(COMMAND_WINDOW_HEIGHT));
    }
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    render_clock(frame, chunks[0]);
    render_banner(frame, app, chunks[1]);
    render_stats(frame, app, chunks[2]);
    render_list(frame, app, chunks[3]);
    if app.command_mode {
        render_command_window(frame, app, chunks[4]);
    }
    render_footer(frame, app, chunks[chunks.len() - 1]);
}

fn render_clock(frame: &mut Frame, area: Rect) {
    let now = Local::now();
    let line = Line::from(vec![
        Span::styled(
            now.format("%a %b %d %Y").to_string(),
            Style::default().fg(COLOR_MUTED),
        ),
        Span::raw("  "),
        Span::styled(
            now.format("%H:%M:%S").to_string(),
            Style::default().fg(COLOR_GLOW).add_modifier(Modifier::BOLD),
        ),
    ]);
    let widget = Paragraph::new(line).alignment(Alignment::Right);
    frame.render_widget(widget, area);
}

fn render_banner(frame: &mut Frame, app: &AppState, area: Rect) {
    let typed = &BANNER_TITLE[..app.banner_revealed.min(BANNER_TITLE.len())];
    let cursor = if app.banner_revealed < BANNER_TITLE.len() {
        "█"
    } else {
        ""
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{typed}{cursor}"),
            Style::default().fg(COLOR_GLOW).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "SECURE TASK MANAGEMENT SYSTEM v2.0",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.store.stats();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let values = [
        ("TOTAL", stats.total, COLOR_GLOW),
        ("PENDING", stats.pending, COLOR_MEDIUM),
        ("COMPLETE", stats.completed, COLOR_LOW),
        ("OVERDUE", stats.overdue, COLOR_HIGH),
    ];

    for (cell, (label, value, color)) in cells.iter().zip(values) {
        let line = Line::from(vec![
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(COLOR_MUTED)),
        ]);
        let widget = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_MUTED)),
        );
        frame.render_widget(widget, *cell);
    }
}

fn task_line(task: &Task) -> Line<'_> {
    let today = Local::now().date_naive();
    let mut spans = vec![
        Span::styled(task.short_id().to_string(), Style::default().fg(COLOR_MUTED)),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority.tag()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw(" "),
        Span::styled(
            if task.completed { "✓" } else { "○" },
            Style::default().fg(if task.completed { COLOR_LOW } else { COLOR_TEXT }),
        ),
        Span::raw(" "),
    ];

    let text_style = if task.completed {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    spans.push(Span::styled(task.text.clone(), text_style));

    if let Some(deadline) = task.deadline {
        let style = if task.is_overdue(today) {
            Style::default().fg(COLOR_OVERDUE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("due {}", deadline.format("%Y-%m-%d")),
            style,
        ));
    }

    Line::from(spans)
}

fn render_list(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let mut title = "═══ TASK LIST ═══".to_string();
    if !app.filters.show_completed {
        title.push_str(" [pending only]");
    }
    if let Some(priority) = app.filters.priority {
        title.push_str(&format!(" [{}]", priority.tag()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_TEXT))
        .title(Span::styled(
            title,
            Style::default().fg(COLOR_GLOW).add_modifier(Modifier::BOLD),
        ));

    let visible = app.visible();
    if visible.is_empty() {
        let message = if app.store.is_empty() {
            "NO TASKS FOUND\nAdd your first task with the command bar (c)"
        } else {
            "NO TASKS FOUND\nAdjust filters to see more tasks (h, p)"
        };
        let widget = Paragraph::new(message)
            .style(Style::default().fg(COLOR_MUTED))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|&idx| ListItem::new(task_line(&app.store.tasks()[idx])))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Rgb(0, 60, 0))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(app.selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_command_window(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_TEXT))
        .title(Span::styled(
            "═══ COMMAND TERMINAL ═══",
            Style::default().fg(COLOR_GLOW).add_modifier(Modifier::BOLD),
        ));

    let start = app.history.len().saturating_sub(HISTORY_VISIBLE);
    let mut lines: Vec<Line> = app.history[start..]
        .iter()
        .map(|entry| {
            let style = if entry.starts_with('✗') {
                Style::default().fg(COLOR_HIGH)
            } else if entry.starts_with('✓') {
                Style::default().fg(COLOR_LOW)
            } else {
                Style::default().fg(COLOR_MUTED)
            };
            Line::from(Span::styled(entry.clone(), style))
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled("$ ", Style::default().fg(COLOR_GLOW)),
        Span::styled(app.command_input.clone(), Style::default().fg(COLOR_TEXT)),
        Span::styled("█", Style::default().fg(COLOR_GLOW)),
    ]));

    let widget = Paragraph::new(lines).block(block);
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some((message, kind)) => {
            let color = match kind {
                StatusKind::Error => COLOR_HIGH,
                StatusKind::Info => COLOR_GLOW,
            };
            Line::from(Span::styled(message.clone(), Style::default().fg(color)))
        }
        None if app.command_mode => Line::from(Span::styled(
            "enter run · esc close · try: add \"task\" high 2025-12-01",
            Style::default().fg(COLOR_MUTED),
        )),
        None => Line::from(Span::styled(
            "q quit · j/k move · space toggle · d delete · h completed · p priority · c terminal",
            Style::default().fg(COLOR_MUTED),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
