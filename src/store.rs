//! Task store: the canonical in-memory collection with write-through
//! persistence.
//!
//! The whole collection lives in one JSON array. It is read once when the
//! store opens (an absent or unreadable file degrades to an empty
//! collection) and rewritten atomically after every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::Result;
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::{Priority, Task, TaskStats};

/// Default store file name under the data directory.
pub const STORE_FILE: &str = "tasks.json";

/// Canonical task collection bound to a store file.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store at `path`, loading any existing collection.
    ///
    /// A missing file yields an empty collection. So does an unparsable
    /// one: the UI must never crash on a bad read, so the failure is only
    /// logged. The bad file stays on disk untouched until the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tasks) => tasks,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "unreadable task store, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, tasks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Create a task and prepend it (newest first).
    pub fn add(
        &mut self,
        text: impl Into<String>,
        priority: Priority,
        deadline: Option<NaiveDate>,
    ) -> Result<&Task> {
        let task = Task::new(text, priority, deadline);
        self.tasks.insert(0, task);
        self.save()?;
        Ok(&self.tasks[0])
    }

    /// Replace the stored task with a matching id. No-op if absent.
    ///
    /// `id` and `created_at` of the stored task are preserved even if the
    /// caller hands in different values.
    pub fn update(&mut self, updated: Task) -> Result<()> {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            let created_at = existing.created_at;
            *existing = updated;
            existing.created_at = created_at;
            self.save()?;
        }
        Ok(())
    }

    /// Remove the task with the exact id. No-op if absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.save()?;
        }
        Ok(())
    }

    /// Flip `completed` on the task with the exact id, returning the new
    /// state, or `None` if no task matches.
    pub fn toggle_complete(&mut self, id: &str) -> Result<Option<bool>> {
        let new_state = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                Some(task.completed)
            }
            None => None,
        };
        if new_state.is_some() {
            self.save()?;
        }
        Ok(new_state)
    }

    /// First task whose id starts with `prefix`, in collection order.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.starts_with(prefix))
    }

    /// Derived counts as of the local calendar date.
    pub fn stats(&self) -> TaskStats {
        self.stats_at(Local::now().date_naive())
    }

    pub fn stats_at(&self, today: NaiveDate) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let overdue = self.tasks.iter().filter(|t| t.is_overdue(today)).count();
        TaskStats {
            total,
            pending: total - completed,
            completed,
            overdue,
        }
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.tasks)?;
        lock::write_atomic_locked(&self.path, json.as_bytes(), DEFAULT_LOCK_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path().join(STORE_FILE));
        (dir, store)
    }

    #[test]
    fn open_missing_file_yields_empty() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
    }

    #[test]
    fn open_corrupt_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);
        fs::write(&path, "not json at all {").unwrap();

        let store = TaskStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn add_prepends_and_persists() {
        let (dir, mut store) = temp_store();

        store.add("first", Priority::Medium, None).unwrap();
        store.add("second", Priority::High, None).unwrap();

        assert_eq!(store.tasks()[0].text, "second");
        assert_eq!(store.tasks()[1].text, "first");

        // Reload from disk and compare element-wise, dates included.
        let reloaded = TaskStore::open(dir.path().join(STORE_FILE));
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let (_dir, mut store) = temp_store();
        store.add("keep", Priority::Low, None).unwrap();
        store.add("drop", Priority::Low, None).unwrap();

        let id = store.tasks()[0].id.clone();
        store.delete(&id).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "keep");

        // Unknown id is a silent no-op.
        store.delete("zzzzzzzz").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_complete_is_an_idempotent_pair() {
        let (_dir, mut store) = temp_store();
        store.add("flip me", Priority::Medium, None).unwrap();
        let id = store.tasks()[0].id.clone();

        assert_eq!(store.toggle_complete(&id).unwrap(), Some(true));
        assert_eq!(store.toggle_complete(&id).unwrap(), Some(false));
        assert!(!store.tasks()[0].completed);

        assert_eq!(store.toggle_complete("missing").unwrap(), None);
    }

    #[test]
    fn update_preserves_id_and_created_at() {
        let (_dir, mut store) = temp_store();
        store.add("original", Priority::Low, None).unwrap();
        let original = store.tasks()[0].clone();

        let mut edited = original.clone();
        edited.text = "edited".to_string();
        edited.priority = Priority::High;
        edited.created_at = chrono::Utc::now();
        store.update(edited).unwrap();

        let stored = &store.tasks()[0];
        assert_eq!(stored.text, "edited");
        assert_eq!(stored.priority, Priority::High);
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.created_at, original.created_at);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let (_dir, mut store) = temp_store();
        store.add("only", Priority::Medium, None).unwrap();

        let mut ghost = store.tasks()[0].clone();
        ghost.id = "does-not-exist".to_string();
        ghost.text = "ghost".to_string();
        store.update(ghost).unwrap();

        assert_eq!(store.tasks()[0].text, "only");
    }

    #[test]
    fn find_by_prefix_takes_first_in_order() {
        let (_dir, mut store) = temp_store();
        store.add("older", Priority::Medium, None).unwrap();
        store.add("newer", Priority::Medium, None).unwrap();

        let newest = &store.tasks()[0];
        let found = store.find_by_prefix(&newest.id[..4]).unwrap();
        assert_eq!(found.text, "newer");

        // Empty prefix matches everything; first in order wins.
        assert_eq!(store.find_by_prefix("").unwrap().text, "newer");
        assert!(store.find_by_prefix("!!nope").is_none());
    }

    #[test]
    fn stats_count_overdue_pending_only() {
        let (_dir, mut store) = temp_store();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        store.add("late", Priority::High, Some(past)).unwrap();
        store.add("on time", Priority::Low, Some(future)).unwrap();
        store.add("late but done", Priority::Medium, Some(past)).unwrap();
        let done_id = store.tasks()[0].id.clone();
        store.toggle_complete(&done_id).unwrap();

        let stats = store.stats_at(today);
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                pending: 2,
                completed: 1,
                overdue: 1,
            }
        );
    }
}
