use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputField, InputMode, View};
use crate::models::Priority;
use crate::stats::format_focus_time;
use crate::timer::format_clock;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let selected = match app.view {
        View::Tasks => 0,
        View::Timer => 1,
        View::Stats => 2,
    };
    let tabs = Tabs::new(vec!["Tasks", "Timer", "Stats"])
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title("Focust"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.view {
        View::Tasks => render_tasks(f, app, chunks[1]),
        View::Timer => render_timer(f, app, chunks[1]),
        View::Stats => render_stats(f, app, chunks[1]),
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view {
            View::Tasks => {
                "q: Quit | Tab: View | a: Add | Space: Toggle Done | d: Del | n: Title | i: Desc | t: Due | p: Prio | f: Filter | s: Sort"
            }
            View::Timer => "q: Quit | Tab: View | Space: Start/Pause | r: Reset | +/-: Focus Duration",
            View::Stats => "q: Quit | Tab: View",
        },
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    render_input_popup(f, app);
}

fn render_tasks(f: &mut Frame, app: &mut App, area: Rect) {
    let today = Local::now().date_naive();

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
            let days_left = (t.due_date - today).num_days();
            let time_left_str = if days_left < 0 {
                format!("{}d overdue", days_left.abs())
            } else if days_left == 0 {
                "Today".to_string()
            } else {
                format!("{}d", days_left)
            };

            let style = if t.completed {
                Style::default().fg(Color::DarkGray)
            } else {
                match t.priority {
                    Priority::High => Style::default().fg(Color::Red),
                    Priority::Medium => Style::default().fg(Color::Yellow),
                    Priority::Low => Style::default().fg(Color::Green),
                }
            };

            Row::new(vec![
                Cell::from(t.id.clone()),
                Cell::from(t.title.clone()),
                Cell::from(t.description.clone()),
                Cell::from(t.due_date.to_string()),
                Cell::from(time_left_str),
                Cell::from(t.priority.to_string()),
                Cell::from(if t.completed { "Done" } else { "Pending" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let title = format!("Focust - Tasks [{} | {}]", app.filter.label(), app.sort.label());
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Title", "Description", "Due", "Time Left", "Priority", "Status"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Focust - Timer");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Phase
            Constraint::Length(2), // Clock
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Session info
        ])
        .split(inner);

    let running = if app.timer.is_running() { "running" } else { "paused" };
    let phase = Paragraph::new(format!("{} ({})", app.timer.phase().label(), running))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(phase, chunks[0]);

    let clock = Paragraph::new(format_clock(app.timer.time_left_secs()))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(clock, chunks[1]);

    let progress = app.timer.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[2]);

    let info = Paragraph::new(vec![
        Line::from(format!(
            "Cycles Completed: {}/{}",
            app.timer.cycles_completed(),
            app.timer.cycles_before_long_break()
        )),
        Line::from(format!("Focus Duration: {} min", app.timer.focus_minutes())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(info, chunks[3]);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(4)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let p = &app.pomodoro_stats;
    let last_session = if p.last_session_date.is_empty() {
        "never".to_string()
    } else {
        p.last_session_date.clone()
    };
    let pomodoro = Paragraph::new(vec![
        Line::from(format!("Total Sessions: {}", p.total_sessions)),
        Line::from(format!("Today's Sessions: {}", p.today_sessions)),
        Line::from(format!("Weekly Sessions: {}", p.weekly_sessions)),
        Line::from(format!("Total Focus Time: {}", format_focus_time(p.total_focus_time))),
        Line::from(format!("Last Session: {}", last_session)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Pomodoro Statistics"));
    f.render_widget(pomodoro, cols[0]);

    let t = &app.task_stats;
    let tasks = Paragraph::new(vec![
        Line::from(format!("Total Tasks: {}", t.total)),
        Line::from(format!("Completed: {}", t.completed)),
        Line::from(format!("Pending: {}", t.pending)),
        Line::from(format!("Completion Rate: {}%", t.completion_rate)),
        Line::from(format!(
            "By Priority: {} high / {} medium / {} low",
            t.by_priority.high, t.by_priority.medium, t.by_priority.low
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Task Statistics"));
    f.render_widget(tasks, cols[1]);

    let quote = Paragraph::new(vec![
        Line::from(format!("\"{}\"", app.quote.text)),
        Line::from(format!("- {}", app.quote.author)),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Daily Motivation"));
    f.render_widget(quote, rows[1]);
}

fn render_input_popup(f: &mut Frame, app: &App) {
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let area = centered_rect(60, 3, f.area());
            f.render_widget(Clear, area);

            let title = match app.input_mode {
                InputMode::Adding => match app.add_state.step {
                    0 => "Add Task: Enter Title",
                    1 => "Add Task: Enter Description (Optional)",
                    2 => "Add Task: Enter Due Date (YYYY-MM-DD)",
                    3 => "Add Task: Enter Priority (low/medium/high, default medium)",
                    _ => "Add Task",
                },
                InputMode::Editing => match app.input_field {
                    InputField::Title => "Edit Title",
                    InputField::Description => "Edit Description",
                    InputField::Due => "Edit Due Date (YYYY-MM-DD)",
                    InputField::Priority => "Edit Priority (low/medium/high)",
                    InputField::None => "Edit",
                },
                InputMode::Normal => "",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        InputMode::Normal => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
