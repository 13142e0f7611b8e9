use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task priority. Serialized lowercase to match the persisted record format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// Represents a single task in the task manager.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, derived from the creation timestamp.
    pub id: String,
    /// Short display title.
    pub title: String,
    /// Free-text description, may be empty.
    #[serde(default)]
    pub description: String,
    /// The due date of the task, used for sorting and display only.
    pub due_date: NaiveDate,
    /// Task priority.
    pub priority: Priority,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
}

/// A task payload without identity, used by add and edit.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

/// Aggregate Pomodoro session counters, persisted as a single record and
/// fully rewritten on every completed timer phase.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroStats {
    /// Completed phases since the first session ever.
    #[serde(default)]
    pub total_sessions: u64,
    /// Completed phases today. Restarts when the day changes.
    #[serde(default)]
    pub today_sessions: u64,
    /// Completed phases this ISO week. Restarts when the week changes.
    #[serde(default)]
    pub weekly_sessions: u64,
    /// Accumulated focus minutes. Break phases contribute nothing.
    #[serde(default)]
    pub total_focus_time: u64,
    /// ISO date (YYYY-MM-DD) of the most recent completion.
    #[serde(default)]
    pub last_session_date: String,
}
