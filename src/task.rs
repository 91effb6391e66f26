//! Task model for ht.
//!
//! Tasks are stored newest-first in a single JSON array (see `store`).
//! Identifiers are lowercase ULIDs; user-facing lookups match on any
//! leading prefix of the id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Number of id characters shown in listings.
pub const ID_DISPLAY_LEN: usize = 8;

/// Urgency level of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Uppercase tag used in listings, e.g. `[HIGH]`.
    pub fn tag(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A single to-do entry.
///
/// `id` and `created_at` are fixed at creation and never change across
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: impl Into<String>, priority: Priority, deadline: Option<NaiveDate>) -> Self {
        Self {
            id: generate_task_id(),
            text: text.into(),
            priority,
            deadline,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Leading id characters shown to the user.
    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(ID_DISPLAY_LEN);
        &self.id[..end]
    }

    /// Whether this task counts as overdue as of `today`.
    ///
    /// Completed tasks are never overdue; a deadline of `today` itself is
    /// not overdue either.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.deadline.map(|d| d < today).unwrap_or(false)
    }
}

/// Transient list filters. Not persisted.
#[derive(Debug, Clone, Copy)]
pub struct TaskFilters {
    pub show_completed: bool,
    pub priority: Option<Priority>,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            show_completed: true,
            priority: None,
        }
    }
}

impl TaskFilters {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.show_completed && task.completed {
            return false;
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        true
    }
}

/// Derived counts over the collection; recomputed on demand.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// Generate a fresh task id: a lowercase ULID.
///
/// Collisions are astronomically unlikely, which is all the prefix lookup
/// scheme requires.
pub fn generate_task_id() -> String {
    Ulid::new().to_string().to_ascii_lowercase()
}
