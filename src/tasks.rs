use std::fmt;

use chrono::Utc;
use clap::ValueEnum;

use crate::models::{Task, TaskDraft};
use crate::storage::{Store, StoreError, TASKS_KEY};

/// Status filter applied to a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Due-date sort order. `None` leaves the insertion order untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    #[default]
    None,
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::Ascending => "due asc",
            SortOrder::Descending => "due desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::None => "none",
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        })
    }
}

/// Owns the persisted task collection.
///
/// Every mutation reloads the full collection, applies the change, and
/// writes the whole sequence back before returning. A missing or corrupt
/// record loads as an empty collection.
pub struct TaskManager<S: Store> {
    store: S,
}

impl<S: Store> TaskManager<S> {
    pub fn new(store: S) -> Self {
        TaskManager { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Vec<Task> {
        self.store.get(TASKS_KEY).unwrap_or_default()
    }

    /// Creates a task from the draft, appends it, and persists.
    pub fn add(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let mut tasks = self.load();
        let task = Task {
            id: next_id(&tasks),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            completed: false,
        };
        tasks.push(task.clone());
        self.store.set(TASKS_KEY, &tasks)?;
        Ok(task)
    }

    /// Replaces the editable fields of the matching task, preserving its id
    /// and completion flag. An unknown id persists the collection unchanged.
    pub fn update(&self, id: &str, draft: TaskDraft) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.load();
        if let Some(t) = tasks.iter_mut().find(|t| t.id == id) {
            t.title = draft.title;
            t.description = draft.description;
            t.due_date = draft.due_date;
            t.priority = draft.priority;
        }
        self.store.set(TASKS_KEY, &tasks)?;
        Ok(tasks)
    }

    /// Flips the completion flag of the matching task.
    pub fn toggle(&self, id: &str) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.load();
        if let Some(t) = tasks.iter_mut().find(|t| t.id == id) {
            t.completed = !t.completed;
        }
        self.store.set(TASKS_KEY, &tasks)?;
        Ok(tasks)
    }

    /// Removes the matching task from the collection.
    pub fn remove(&self, id: &str) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.load();
        tasks.retain(|t| t.id != id);
        self.store.set(TASKS_KEY, &tasks)?;
        Ok(tasks)
    }
}

/// Millisecond-timestamp id, bumped until unique within the collection.
fn next_id(tasks: &[Task]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while tasks.iter().any(|t| t.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Pure status filter over a task slice.
pub fn filter_tasks(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            StatusFilter::All => true,
            StatusFilter::Pending => !t.completed,
            StatusFilter::Completed => t.completed,
        })
        .cloned()
        .collect()
}

/// Stable due-date sort. `SortOrder::None` is the identity.
pub fn sort_by_due_date(mut tasks: Vec<Task>, order: SortOrder) -> Vec<Task> {
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
        SortOrder::Descending => tasks.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
    }
    tasks
}
