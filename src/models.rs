use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How strongly a task should pull attention in the list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parses a priority from user input (case-insensitive).
    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Whether a task is a plain item or a series with subtasks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskType {
    #[default]
    Single,
    Series,
}

/// An independently completable item belonging to one Series task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubTask {
    /// Identifier unique within the parent task.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Whether this item is done.
    #[serde(default)]
    pub completed: bool,
}

/// A user-defined unit of work, optionally composed of subtasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Opaque unique identifier, assigned at creation, immutable after.
    pub id: String,
    /// Display title. Non-emptiness is enforced by the creation path,
    /// not by the store.
    pub title: String,
    /// Free-text description, may be empty.
    #[serde(default)]
    pub description: String,
    /// Due date/time as an ISO-8601-like string. Kept verbatim; no
    /// timezone normalization.
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
    /// Free-text category label, may be empty.
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
    #[serde(default)]
    pub completed: bool,
    /// Present only for Series tasks; insertion order is significant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<SubTask>>,
}

impl Task {
    pub fn is_series(&self) -> bool {
        self.kind == TaskType::Series
    }
}

/// Generates a fresh opaque id for a task or subtask.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
