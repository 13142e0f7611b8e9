use crate::models::{PomodoroStats, Priority, Task};
use crate::storage::{Store, STATS_KEY};

/// Task counts grouped by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Derived task statistics. Pure view, recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share in whole percent, 0 for an empty collection.
    pub completion_rate: u32,
    pub by_priority: PriorityCounts,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let mut by_priority = PriorityCounts::default();
        for t in tasks {
            match t.priority {
                Priority::High => by_priority.high += 1,
                Priority::Medium => by_priority.medium += 1,
                Priority::Low => by_priority.low += 1,
            }
        }
        let completion_rate = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        TaskStats {
            total,
            completed,
            pending: total - completed,
            completion_rate,
            by_priority,
        }
    }
}

/// Loads the persisted Pomodoro counters, defaulting to zeroes.
pub fn load_pomodoro_stats<S: Store>(store: &S) -> PomodoroStats {
    store.get(STATS_KEY).unwrap_or_default()
}

/// Formats accumulated focus minutes as hours and minutes, e.g. "2h 5m".
pub fn format_focus_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
