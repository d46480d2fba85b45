use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Static reference data describing a scorable task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub task_id: String,
    pub task_name: String,
    pub score: f64,
    pub is_routine: bool,
}

/// One logical completion record per (username, date, task_id); the latest
/// write for that key supersedes earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionRecord {
    pub username: String,
    pub date: NaiveDate,
    pub task_id: String,
    pub completed: bool,
}

/// A routine task definition merged with the caller's completed flag for one
/// day's checklist save. Non-routine tasks never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub task_id: String,
    pub task_name: String,
    pub score: f64,
    pub completed: bool,
}
