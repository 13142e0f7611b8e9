use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Priority, TaskDraft};
use crate::quotes::random_quote;
use crate::stats::{format_focus_time, load_pomodoro_stats, TaskStats};
use crate::storage::{FileStore, Store, STATS_KEY, TASKS_KEY};
use crate::tasks::{filter_tasks, sort_by_due_date, SortOrder, StatusFilter, TaskManager};

fn manager() -> TaskManager<FileStore> {
    TaskManager::new(FileStore::new())
}

/// Adds a new task.
pub fn cmd_add(title: String, description: String, due: String, priority: Priority, silent: bool) {
    if title.trim().is_empty() {
        if !silent { eprintln!("Task title must not be empty."); }
        return;
    }
    let due_date = match NaiveDate::parse_from_str(&due, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", due, e); }
            return;
        }
    };
    match manager().add(TaskDraft { title, description, due_date, priority }) {
        Ok(task) => {
            if !silent { println!("Task added (id = {})", task.id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Lists tasks in a formatted table, optionally filtered by status and
/// sorted by due date.
pub fn cmd_list(filter: StatusFilter, sort: SortOrder) {
    let tasks = sort_by_due_date(filter_tasks(&manager().load(), filter), sort);
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Time Left").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let today = Local::now().date_naive();

    for t in tasks {
        let days_left = (t.due_date - today).num_days();
        let time_left_str = if days_left < 0 {
            format!("{}d overdue", days_left.abs())
        } else if days_left == 0 {
            "Today".to_string()
        } else {
            format!("{}d", days_left)
        };

        let priority_color = match t.priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.title),
            Cell::new(&t.description),
            Cell::new(t.due_date),
            Cell::new(time_left_str).fg(if days_left < 0 && !t.completed { Color::Red } else { Color::Reset }),
            Cell::new(t.priority.to_string()).fg(priority_color),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Flips the completion flag of a task by ID.
pub fn cmd_toggle(id: String, silent: bool) {
    let mgr = manager();
    let Some(was_completed) = mgr.load().iter().find(|t| t.id == id).map(|t| t.completed) else {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    };
    match mgr.toggle(&id) {
        Ok(_) => {
            if !silent {
                if was_completed {
                    println!("Task {} marked as pending.", id);
                } else {
                    println!("Task {} marked as complete.", id);
                }
            }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Removes a task by ID.
pub fn cmd_remove(id: String, silent: bool) {
    let mgr = manager();
    let len_before = mgr.load().len();
    match mgr.remove(&id) {
        Ok(tasks) => {
            if tasks.len() == len_before {
                if !silent { eprintln!("Task {} not found.", id); }
            } else if !silent {
                println!("Task {} removed.", id);
            }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Edits an existing task, merging the given fields over its current values.
pub fn cmd_edit(
    id: String,
    title: Option<String>,
    description: Option<String>,
    due: Option<String>,
    priority: Option<Priority>,
    silent: bool,
) {
    let mgr = manager();
    let Some(existing) = mgr.load().into_iter().find(|t| t.id == id) else {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    };

    let due_date = match due {
        Some(d) => match NaiveDate::parse_from_str(&d, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", d, e); }
                return;
            }
        },
        None => existing.due_date,
    };
    let draft = TaskDraft {
        title: title.unwrap_or(existing.title),
        description: description.unwrap_or(existing.description),
        due_date,
        priority: priority.unwrap_or(existing.priority),
    };

    match mgr.update(&id, draft) {
        Ok(_) => {
            if !silent { println!("Task {} updated.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
        }
    }
}

/// Prints the statistics dashboard: Pomodoro counters and task breakdown.
pub fn cmd_stats() {
    let store = FileStore::new();
    let pomodoro = load_pomodoro_stats(&store);
    let tasks = TaskManager::new(store).load();
    let task_stats = TaskStats::from_tasks(&tasks);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Pomodoro").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![Cell::new("Total Sessions"), Cell::new(pomodoro.total_sessions)]);
    table.add_row(vec![Cell::new("Today's Sessions"), Cell::new(pomodoro.today_sessions)]);
    table.add_row(vec![Cell::new("Weekly Sessions"), Cell::new(pomodoro.weekly_sessions)]);
    table.add_row(vec![
        Cell::new("Total Focus Time"),
        Cell::new(format_focus_time(pomodoro.total_focus_time)),
    ]);
    if !pomodoro.last_session_date.is_empty() {
        table.add_row(vec![Cell::new("Last Session"), Cell::new(&pomodoro.last_session_date)]);
    }
    println!("{table}");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Tasks").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![Cell::new("Total"), Cell::new(task_stats.total)]);
    table.add_row(vec![Cell::new("Completed"), Cell::new(task_stats.completed)]);
    table.add_row(vec![Cell::new("Pending"), Cell::new(task_stats.pending)]);
    table.add_row(vec![
        Cell::new("Completion Rate"),
        Cell::new(format!("{}%", task_stats.completion_rate)),
    ]);
    table.add_row(vec![
        Cell::new("High Priority").fg(Color::Red),
        Cell::new(task_stats.by_priority.high),
    ]);
    table.add_row(vec![
        Cell::new("Medium Priority").fg(Color::Yellow),
        Cell::new(task_stats.by_priority.medium),
    ]);
    table.add_row(vec![
        Cell::new("Low Priority").fg(Color::Green),
        Cell::new(task_stats.by_priority.low),
    ]);
    println!("{table}");
}

/// Prints a motivational quote.
pub fn cmd_quote(offline: bool) {
    let quote = random_quote(offline);
    println!("\"{}\"", quote.text);
    println!("    - {}", quote.author);
}

/// Deletes the persisted tasks and Pomodoro statistics.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and statistics? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    let store = FileStore::new();
    let result = store.remove(TASKS_KEY).and_then(|_| store.remove(STATS_KEY));
    match result {
        Ok(()) => println!("Data reset successfully."),
        Err(e) => eprintln!("Failed to reset data: {}", e),
    }
}
