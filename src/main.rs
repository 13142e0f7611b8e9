//! # Focust
//!
//! A terminal productivity companion written in Rust. Focust combines a task
//! manager, a Pomodoro focus timer, and a statistics dashboard behind a fast
//! CLI for quick entry and a TUI (Terminal User Interface) for interactive
//! use.
//!
//! ## Features
//!
//! *   **Tasks**: Priorities, due dates, status filters, and due-date sorting.
//! *   **Pomodoro Timer**: Focus/short-break/long-break cycle with an
//!     adjustable focus duration; every completed phase feeds the statistics.
//! *   **Statistics**: Session counters, total focus time, and a task
//!     breakdown by priority and completion.
//! *   **Dual Interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard with Tasks, Timer, and Stats views.
//! *   **Daily Motivation**: A quote from a public API, with a bundled
//!     fallback when offline.
//! *   **Data Persistence**: JSON records in the standard XDG data directory.
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Simply run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! focust
//! # or explicitly
//! focust ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Global**
//! *   `q`: Quit
//! *   `Tab` / `1` / `2` / `3`: Switch between Tasks, Timer, and Stats views
//!
//! **Tasks View**
//! *   `a`: Add new task
//! *   `Space`: Toggle completion of selected task
//! *   `d`: Delete selected task
//! *   `n`: Edit title
//! *   `i`: Edit description
//! *   `t`: Edit due date
//! *   `p`: Edit priority
//! *   `f`: Cycle status filter (all / pending / completed)
//! *   `s`: Cycle due-date sort (none / ascending / descending)
//!
//! **Timer View**
//! *   `Space`: Start / pause
//! *   `r`: Reset
//! *   `+` / `-`: Adjust the focus duration (while paused)
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Add a task
//! focust add "Write report" --desc "Quarterly numbers" --due 2025-12-01 --priority high
//!
//! # List pending tasks, soonest due date first
//! focust list --filter pending --sort asc
//!
//! # Toggle completion / remove
//! focust toggle <ID>
//! focust remove <ID>
//!
//! # Statistics dashboard
//! focust stats
//!
//! # A motivational quote
//! focust quote
//! ```
//!
//! ## Data Storage
//!
//! Records are saved in your local data directory:
//! *   Linux: `~/.local/share/focust/`
//! *   macOS: `~/Library/Application Support/focust/`
//! *   Windows: `%APPDATA%\focust\`
//!
//! You can override this by setting the `FOCUST_DATA` environment variable.
//! Set `FOCUST_DEBUG` to enable tracing output.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use focust::commands::*;
use focust::models::Priority;
use focust::tasks::{SortOrder, StatusFilter};
use focust::tui::run_tui;

#[derive(Parser)]
#[command(name = "focust")]
#[command(about = "Terminal task manager with a Pomodoro focus timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Free-text description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: String,
        /// Priority (low, medium, high)
        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Status filter
        #[arg(short, long, value_enum, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
        /// Due-date sort order
        #[arg(short, long, value_enum, default_value_t = SortOrder::None)]
        sort: SortOrder,
    },
    /// Toggle completion of a task
    Toggle {
        id: String,
    },
    /// Remove a task
    Remove {
        id: String,
    },
    /// Edit a task
    Edit {
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
        /// New priority
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
    },
    /// Show the statistics dashboard
    Stats,
    /// Print a motivational quote
    Quote {
        /// Skip the network and use a bundled quote
        #[arg(long)]
        offline: bool,
    },
    /// Reset all data (delete tasks and statistics)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    if std::env::var("FOCUST_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("focust=debug")
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { title, desc, due, priority }) => cmd_add(title, desc, due, priority, false),
        Some(Commands::List { filter, sort }) => cmd_list(filter, sort),
        Some(Commands::Toggle { id }) => cmd_toggle(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Edit { id, title, desc, due, priority }) => cmd_edit(id, title, desc, due, priority, false),
        Some(Commands::Stats) => cmd_stats(),
        Some(Commands::Quote { offline }) => cmd_quote(offline),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "focust", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
