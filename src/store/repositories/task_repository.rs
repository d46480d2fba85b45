use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::task::{TaskCompletionRecord, TaskDefinition};
use crate::store::DataDir;
use crate::utils::time::{format_date, parse_date};

const TASKS_TABLE: &str = "tasks";
const TASK_LOGS_TABLE: &str = "task_logs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinitionRow {
    pub task_id: String,
    pub task_name: String,
    pub score: f64,
    pub is_routine: bool,
}

impl TaskDefinitionRow {
    pub fn from_definition(definition: &TaskDefinition) -> Self {
        Self {
            task_id: definition.task_id.clone(),
            task_name: definition.task_name.clone(),
            score: definition.score,
            is_routine: definition.is_routine,
        }
    }

    pub fn into_definition(self) -> TaskDefinition {
        TaskDefinition {
            task_id: self.task_id,
            task_name: self.task_name,
            score: self.score,
            is_routine: self.is_routine,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletionRow {
    pub username: String,
    pub date: String,
    pub task_id: String,
    pub completed: bool,
}

impl TaskCompletionRow {
    pub fn from_record(record: &TaskCompletionRecord) -> Self {
        Self {
            username: record.username.clone(),
            date: format_date(record.date),
            task_id: record.task_id.clone(),
            completed: record.completed,
        }
    }

    pub fn into_record(self) -> AppResult<TaskCompletionRecord> {
        Ok(TaskCompletionRecord {
            username: self.username,
            date: parse_date(&self.date)?,
            task_id: self.task_id,
            completed: self.completed,
        })
    }
}

pub struct TaskRepository;

impl TaskRepository {
    pub fn list_routine_tasks(data: &DataDir) -> AppResult<Vec<TaskDefinition>> {
        let rows: Vec<TaskDefinitionRow> = data.read_rows(TASKS_TABLE)?;
        Ok(rows
            .into_iter()
            .filter(|row| row.is_routine)
            .map(TaskDefinitionRow::into_definition)
            .collect())
    }

    /// Replaces the task reference data wholesale (admin import).
    pub fn save_definitions(data: &DataDir, definitions: &[TaskDefinition]) -> AppResult<()> {
        let rows: Vec<TaskDefinitionRow> = definitions
            .iter()
            .map(TaskDefinitionRow::from_definition)
            .collect();
        data.update_rows::<TaskDefinitionRow, _>(TASKS_TABLE, |_| rows)
    }

    /// Latest completion flag per task for one person and day. The raw log may
    /// carry superseded rows for the key; the last write wins here.
    pub fn completions_for(
        data: &DataDir,
        username: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<TaskCompletionRecord>> {
        let key = format_date(date);
        let rows: Vec<TaskCompletionRow> = data.read_rows(TASK_LOGS_TABLE)?;

        let mut latest: HashMap<String, TaskCompletionRow> = HashMap::new();
        for row in rows
            .into_iter()
            .filter(|row| row.username == username && row.date == key)
        {
            latest.insert(row.task_id.clone(), row);
        }

        latest
            .into_values()
            .map(TaskCompletionRow::into_record)
            .collect()
    }

    /// Drops every completion row for (username, date) and appends the new
    /// checklist state, leaving one authoritative row per task.
    pub fn replace_completions(
        data: &DataDir,
        username: &str,
        date: NaiveDate,
        records: &[TaskCompletionRecord],
    ) -> AppResult<()> {
        let key = format_date(date);
        let owner = username.to_string();
        let replacements: Vec<TaskCompletionRow> =
            records.iter().map(TaskCompletionRow::from_record).collect();

        data.update_rows::<TaskCompletionRow, _>(TASK_LOGS_TABLE, move |rows| {
            let mut kept: Vec<TaskCompletionRow> = rows
                .into_iter()
                .filter(|row| !(row.username == owner && row.date == key))
                .collect();
            kept.extend(replacements);
            kept
        })
    }
}
