use chrono::NaiveDate;
use tempfile::TempDir;

use focust::models::{Priority, Task, TaskDraft};
use focust::storage::{FileStore, MemoryStore, Store, TASKS_KEY};
use focust::tasks::{filter_tasks, sort_by_due_date, SortOrder, StatusFilter, TaskManager};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(title: &str, due: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        title: title.into(),
        description: String::new(),
        due_date: date(due),
        priority,
    }
}

#[test]
fn add_appends_in_order_with_unique_ids() {
    let manager = TaskManager::new(MemoryStore::new());

    manager.add(draft("First", "2025-12-01", Priority::Low)).unwrap();
    manager.add(draft("Second", "2025-11-01", Priority::Medium)).unwrap();
    manager.add(draft("Third", "2025-10-01", Priority::High)).unwrap();

    let tasks = manager.load();
    assert_eq!(tasks.len(), 3);
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    let mut ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn added_task_round_trips_through_the_file_store() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::at(dir.path());

    let created = TaskManager::new(store.clone())
        .add(TaskDraft {
            title: "Write report".into(),
            description: "Quarterly numbers".into(),
            due_date: date("2024-06-01"),
            priority: Priority::High,
        })
        .unwrap();
    assert!(!created.id.is_empty());
    assert!(!created.completed);

    // A fresh manager over the same directory sees an identical record.
    let reloaded = TaskManager::new(store).load();
    assert_eq!(reloaded, vec![created]);
}

#[test]
fn update_replaces_fields_but_preserves_id_and_completion() {
    let manager = TaskManager::new(MemoryStore::new());
    let created = manager.add(draft("Draft", "2025-12-01", Priority::Low)).unwrap();
    manager.toggle(&created.id).unwrap();

    let tasks = manager
        .update(
            &created.id,
            TaskDraft {
                title: "Final".into(),
                description: "polished".into(),
                due_date: date("2025-12-24"),
                priority: Priority::High,
            },
        )
        .unwrap();

    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id, created.id);
    assert!(task.completed);
    assert_eq!(task.title, "Final");
    assert_eq!(task.description, "polished");
    assert_eq!(task.due_date, date("2025-12-24"));
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn update_with_unknown_id_persists_collection_unchanged() {
    let store = MemoryStore::new();
    let manager = TaskManager::new(store.clone());
    let created = manager.add(draft("Keep me", "2025-12-01", Priority::Medium)).unwrap();

    let tasks = manager
        .update("no-such-id", draft("Ignored", "2030-01-01", Priority::High))
        .unwrap();

    assert_eq!(tasks, vec![created.clone()]);
    // The write still happened.
    let persisted: Vec<Task> = store.get(TASKS_KEY).unwrap();
    assert_eq!(persisted, vec![created]);
}

#[test]
fn toggle_flips_completion_both_ways() {
    let manager = TaskManager::new(MemoryStore::new());
    let created = manager.add(draft("Flip", "2025-12-01", Priority::Medium)).unwrap();

    let tasks = manager.toggle(&created.id).unwrap();
    assert!(tasks[0].completed);

    let tasks = manager.toggle(&created.id).unwrap();
    assert!(!tasks[0].completed);
}

#[test]
fn remove_deletes_exactly_the_matching_task() {
    let manager = TaskManager::new(MemoryStore::new());
    let first = manager.add(draft("First", "2025-12-01", Priority::Low)).unwrap();
    let second = manager.add(draft("Second", "2025-12-02", Priority::Low)).unwrap();

    let tasks = manager.remove(&first.id).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, second.id);

    // Removing a missing id is a no-op.
    let tasks = manager.remove("no-such-id").unwrap();
    assert_eq!(tasks.len(), 1);
}

#[test]
fn missing_or_corrupt_record_loads_as_empty() {
    let store = MemoryStore::new();
    let manager = TaskManager::new(store.clone());
    assert!(manager.load().is_empty());

    store.set_raw(TASKS_KEY, "definitely not json").unwrap();
    assert!(manager.load().is_empty());
}

#[test]
fn pending_and_completed_partition_the_collection() {
    let manager = TaskManager::new(MemoryStore::new());
    for i in 0..6 {
        let created = manager
            .add(draft(&format!("Task {}", i), "2025-12-01", Priority::Medium))
            .unwrap();
        if i % 2 == 0 {
            manager.toggle(&created.id).unwrap();
        }
    }

    let all = manager.load();
    let pending = filter_tasks(&all, StatusFilter::Pending);
    let completed = filter_tasks(&all, StatusFilter::Completed);

    assert_eq!(pending.len() + completed.len(), all.len());
    assert!(pending.iter().all(|t| !t.completed));
    assert!(completed.iter().all(|t| t.completed));
    assert!(pending.iter().all(|p| completed.iter().all(|c| c.id != p.id)));
    assert_eq!(filter_tasks(&all, StatusFilter::All).len(), all.len());
}

#[test]
fn sort_orders_by_due_date_and_none_is_identity() {
    let manager = TaskManager::new(MemoryStore::new());
    manager.add(draft("Middle", "2025-06-15", Priority::Low)).unwrap();
    manager.add(draft("Late", "2025-12-01", Priority::Low)).unwrap();
    manager.add(draft("Early", "2025-01-05", Priority::Low)).unwrap();
    let tasks = manager.load();

    let unsorted = sort_by_due_date(tasks.clone(), SortOrder::None);
    assert_eq!(unsorted, tasks);

    let ascending = sort_by_due_date(tasks.clone(), SortOrder::Ascending);
    let titles: Vec<&str> = ascending.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Early", "Middle", "Late"]);

    let descending = sort_by_due_date(tasks, SortOrder::Descending);
    let titles: Vec<&str> = descending.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Late", "Middle", "Early"]);
}

#[test]
fn sorting_is_idempotent() {
    let manager = TaskManager::new(MemoryStore::new());
    manager.add(draft("A", "2025-06-15", Priority::Low)).unwrap();
    manager.add(draft("B", "2025-06-15", Priority::Low)).unwrap();
    manager.add(draft("C", "2025-01-05", Priority::Low)).unwrap();

    let once = sort_by_due_date(manager.load(), SortOrder::Ascending);
    let twice = sort_by_due_date(once.clone(), SortOrder::Ascending);
    assert_eq!(once, twice);
}
