use chrono::NaiveDate;
use ratatui::widgets::TableState;
use tracing::warn;

use crate::models::{PomodoroStats, Priority, Task, TaskDraft};
use crate::quotes::{fallback_quote, Quote};
use crate::stats::{load_pomodoro_stats, TaskStats};
use crate::storage::FileStore;
use crate::tasks::{filter_tasks, sort_by_due_date, SortOrder, StatusFilter, TaskManager};
use crate::timer::PomodoroTimer;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(Clone, Copy, PartialEq)]
pub enum View {
    Tasks,
    Timer,
    Stats,
}

pub enum InputField {
    None,
    Title,
    Description,
    Due,
    Priority,
}

pub struct App {
    pub manager: TaskManager<FileStore>,
    pub timer: PomodoroTimer<FileStore>,
    /// Tasks after the current filter and sort, in display order.
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub view: View,
    pub filter: StatusFilter,
    pub sort: SortOrder,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<String>,
    pub add_state: AddState,
    pub quote: Quote,
    pub pomodoro_stats: PomodoroStats,
    pub task_stats: TaskStats,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub description: String,
    pub due: Option<NaiveDate>,
    pub step: usize, // 0: Title, 1: Description, 2: Due, 3: Priority
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let store = FileStore::new();
        let mut app = App {
            manager: TaskManager::new(store.clone()),
            timer: PomodoroTimer::new(store),
            tasks: Vec::new(),
            state: TableState::default(),
            view: View::Tasks,
            filter: StatusFilter::All,
            sort: SortOrder::None,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            // The TUI never blocks on the network; the quote is a bundled one.
            quote: fallback_quote(None).1,
            pomodoro_stats: PomodoroStats::default(),
            task_stats: TaskStats::default(),
        };
        app.reload();
        app.refresh_stats();
        app
    }

    /// Reloads tasks from storage and reapplies the filter and sort.
    pub fn reload(&mut self) {
        self.tasks = sort_by_due_date(filter_tasks(&self.manager.load(), self.filter), self.sort);

        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Recomputes both statistics panels from the persisted records.
    pub fn refresh_stats(&mut self) {
        self.pomodoro_stats = load_pomodoro_stats(self.manager.store());
        self.task_stats = TaskStats::from_tasks(&self.manager.load());
    }

    /// Advances the timer by one second and refreshes the statistics
    /// snapshot whenever a phase completed.
    pub fn on_tick(&mut self) {
        if self.timer.tick().is_some() {
            self.refresh_stats();
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        if self.view == View::Stats {
            self.refresh_stats();
        }
    }

    pub fn next_view(&mut self) {
        let next = match self.view {
            View::Tasks => View::Timer,
            View::Timer => View::Stats,
            View::Stats => View::Tasks,
        };
        self.set_view(next);
    }

    /// Selects the next task in the list.
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the list.
    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_id(&self) -> Option<String> {
        self.state
            .selected()
            .and_then(|i| self.tasks.get(i))
            .map(|t| t.id.clone())
    }

    /// Toggles completion of the currently selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Err(e) = self.manager.toggle(&id) {
                warn!(error = %e, "failed to toggle task");
            }
            self.reload();
        }
    }

    /// Deletes the currently selected task.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Err(e) = self.manager.remove(&id) {
                warn!(error = %e, "failed to remove task");
            }
            self.reload();
        }
    }

    /// Cycles the status filter (all, pending, completed).
    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        };
        self.reload();
    }

    /// Cycles the due-date sort (none, ascending, descending).
    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        };
        self.reload();
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates editing of a specific field for the selected task.
    pub fn start_edit(&mut self, field: InputField) {
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.tasks.get(i) {
                self.target_id = Some(t.id.clone());
                self.input_mode = InputMode::Editing;
                self.input_buffer = match field {
                    InputField::Title => t.title.clone(),
                    InputField::Description => t.description.clone(),
                    InputField::Due => t.due_date.to_string(),
                    InputField::Priority => t.priority.to_string(),
                    InputField::None => String::new(),
                };
                self.input_field = field;
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    /// Handles the Enter key based on the current input mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            InputMode::Normal => {}
        }
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Title is required
                if !self.input_buffer.trim().is_empty() {
                    self.add_state.title = self.input_buffer.trim().to_string();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                self.add_state.description = self.input_buffer.clone();
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            2 => {
                // Stay on this step until the date parses
                if let Ok(date) = NaiveDate::parse_from_str(self.input_buffer.trim(), "%Y-%m-%d") {
                    self.add_state.due = Some(date);
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            3 => {
                let priority = if self.input_buffer.trim().is_empty() {
                    Priority::Medium
                } else if let Ok(p) = self.input_buffer.parse::<Priority>() {
                    p
                } else {
                    return;
                };
                let Some(due_date) = self.add_state.due else { return };
                let draft = TaskDraft {
                    title: self.add_state.title.clone(),
                    description: self.add_state.description.clone(),
                    due_date,
                    priority,
                };
                if let Err(e) = self.manager.add(draft) {
                    warn!(error = %e, "failed to add task");
                }
                self.cancel_input();
                self.reload();
            }
            _ => {}
        }
    }

    fn handle_editing_input(&mut self) {
        let Some(id) = self.target_id.clone() else { return };
        let Some(existing) = self.manager.load().into_iter().find(|t| t.id == id) else {
            self.cancel_input();
            return;
        };

        let mut draft = TaskDraft {
            title: existing.title,
            description: existing.description,
            due_date: existing.due_date,
            priority: existing.priority,
        };
        match self.input_field {
            InputField::Title => {
                if !self.input_buffer.trim().is_empty() {
                    draft.title = self.input_buffer.trim().to_string();
                }
            }
            InputField::Description => draft.description = self.input_buffer.clone(),
            InputField::Due => {
                if let Ok(date) = NaiveDate::parse_from_str(self.input_buffer.trim(), "%Y-%m-%d") {
                    draft.due_date = date;
                }
            }
            InputField::Priority => {
                if let Ok(p) = self.input_buffer.parse::<Priority>() {
                    draft.priority = p;
                }
            }
            InputField::None => {}
        }
        if let Err(e) = self.manager.update(&id, draft) {
            warn!(error = %e, "failed to update task");
        }
        self.cancel_input();
        self.reload();
    }
}
