pub mod app;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use self::app::{App, InputField, InputMode, View};
use self::ui::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const ONE_SECOND: Duration = Duration::from_secs(1);

pub fn run_tui() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_second = Instant::now();
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Polling with a timeout keeps the countdown moving while no keys
        // arrive; this loop is the timer's only tick source.
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Tab => app.next_view(),
                        KeyCode::Char('1') => app.set_view(View::Tasks),
                        KeyCode::Char('2') => app.set_view(View::Timer),
                        KeyCode::Char('3') => app.set_view(View::Stats),
                        _ => match app.view {
                            View::Tasks => match key.code {
                                KeyCode::Down | KeyCode::Char('j') => app.next(),
                                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                                KeyCode::Char(' ') => app.toggle_selected(),
                                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                                KeyCode::Char('a') => app.start_add(),
                                KeyCode::Char('n') => app.start_edit(InputField::Title),
                                KeyCode::Char('i') => app.start_edit(InputField::Description),
                                KeyCode::Char('t') => app.start_edit(InputField::Due),
                                KeyCode::Char('p') => app.start_edit(InputField::Priority),
                                KeyCode::Char('f') => app.cycle_filter(),
                                KeyCode::Char('s') => app.cycle_sort(),
                                _ => {}
                            },
                            View::Timer => match key.code {
                                KeyCode::Char(' ') => app.timer.toggle(),
                                KeyCode::Char('r') => app.timer.reset(),
                                KeyCode::Char('+') | KeyCode::Char('=') => {
                                    let minutes = app.timer.focus_minutes() + 5;
                                    app.timer.set_focus_duration(minutes);
                                }
                                KeyCode::Char('-') => {
                                    let minutes = app.timer.focus_minutes();
                                    if minutes > 5 {
                                        app.timer.set_focus_duration(minutes - 5);
                                    }
                                }
                                _ => {}
                            },
                            View::Stats => {}
                        },
                    },
                    InputMode::Editing | InputMode::Adding => match key.code {
                        KeyCode::Enter => app.handle_input(),
                        KeyCode::Esc => app.cancel_input(),
                        KeyCode::Char(c) => {
                            app.input_buffer.push(c);
                        }
                        KeyCode::Backspace => {
                            app.input_buffer.pop();
                        }
                        _ => {}
                    },
                }
            }
        }

        // Drain whole elapsed seconds so a slow frame loses no ticks; while
        // paused the anchor follows the clock so resuming starts fresh.
        if app.timer.is_running() {
            while last_second.elapsed() >= ONE_SECOND {
                app.on_tick();
                last_second += ONE_SECOND;
            }
        } else {
            last_second = Instant::now();
        }
    }
}
