use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::score::{DailyScore, ScoreAdjustment};
use crate::models::task::{ChecklistItem, TaskCompletionRecord};
use crate::store::repositories::adjustment_repository::AdjustmentRepository;
use crate::store::repositories::score_repository::ScoreRepository;
use crate::store::repositories::task_repository::TaskRepository;
use crate::store::DataDir;

/// Rolling window for the recent-average metric, in calendar days.
pub const TRAILING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScoreSummary {
    pub score: DailyScore,
    /// `None` when the window holds no data; reported as insufficient data,
    /// never as zero.
    pub trailing_average: Option<f64>,
}

#[derive(Clone)]
pub struct ScoringService {
    data: DataDir,
}

impl ScoringService {
    pub fn new(data: DataDir) -> Self {
        Self { data }
    }

    /// Routine tasks merged with the day's saved completion flags, so a
    /// second visit to the checklist shows what was already ticked.
    pub fn checklist_for(&self, username: &str, date: NaiveDate) -> AppResult<Vec<ChecklistItem>> {
        let tasks = TaskRepository::list_routine_tasks(&self.data)?;
        let completions = TaskRepository::completions_for(&self.data, username, date)?;
        let completed_ids: HashSet<String> = completions
            .into_iter()
            .filter(|record| record.completed)
            .map(|record| record.task_id)
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| ChecklistItem {
                completed: completed_ids.contains(&task.task_id),
                task_id: task.task_id,
                task_name: task.task_name,
                score: task.score,
            })
            .collect())
    }

    /// Persists the submitted checklist state, recomputes the daily score and
    /// upserts it (one authoritative row per user and day), then reports the
    /// trailing average over the last [`TRAILING_WINDOW_DAYS`] days.
    pub fn save_checklist(
        &self,
        username: &str,
        date: NaiveDate,
        completed_task_ids: &[String],
    ) -> AppResult<DailyScoreSummary> {
        let tasks = TaskRepository::list_routine_tasks(&self.data)?;
        let known_ids: HashSet<&str> = tasks.iter().map(|task| task.task_id.as_str()).collect();
        if let Some(unknown) = completed_task_ids
            .iter()
            .find(|id| !known_ids.contains(id.as_str()))
        {
            return Err(AppError::validation(format!("未知的任务编号: {unknown}")));
        }

        let completed: HashSet<&str> = completed_task_ids.iter().map(String::as_str).collect();
        let checklist: Vec<ChecklistItem> = tasks
            .into_iter()
            .map(|task| ChecklistItem {
                completed: completed.contains(task.task_id.as_str()),
                task_id: task.task_id,
                task_name: task.task_name,
                score: task.score,
            })
            .collect();

        let records: Vec<TaskCompletionRecord> = checklist
            .iter()
            .map(|item| TaskCompletionRecord {
                username: username.to_string(),
                date,
                task_id: item.task_id.clone(),
                completed: item.completed,
            })
            .collect();
        TaskRepository::replace_completions(&self.data, username, date, &records)?;

        let adjustments = AdjustmentRepository::list_for(&self.data, username, date)?;
        let score = compute_daily_score(username, date, &checklist, &adjustments);
        ScoreRepository::upsert(&self.data, &score)?;

        let history = ScoreRepository::list_for_user(&self.data, username)?;
        let trailing_average = trailing_average(username, date, &history, TRAILING_WINDOW_DAYS);

        info!(
            target: "app::scoring",
            %username,
            %date,
            total = score.total_score,
            "daily score saved"
        );

        Ok(DailyScoreSummary {
            score,
            trailing_average,
        })
    }

    pub fn add_adjustment(&self, adjustment: &ScoreAdjustment) -> AppResult<()> {
        AdjustmentRepository::append(&self.data, adjustment)?;
        info!(
            target: "app::scoring",
            username = %adjustment.username,
            date = %adjustment.date,
            delta = adjustment.score,
            "score adjustment recorded"
        );
        Ok(())
    }
}

/// Combines checklist completions with administrator adjustments into the
/// day's totals. Pure and idempotent: identical inputs always yield the same
/// record; persistence is the caller's concern.
pub fn compute_daily_score(
    username: &str,
    date: NaiveDate,
    checklist: &[ChecklistItem],
    adjustments: &[ScoreAdjustment],
) -> DailyScore {
    let base_score: f64 = checklist
        .iter()
        .filter(|item| item.completed)
        .map(|item| item.score)
        .sum();
    let adjusted_score: f64 = adjustments
        .iter()
        .filter(|adjustment| adjustment.username == username && adjustment.date == date)
        .map(|adjustment| adjustment.score)
        .sum();

    debug!(
        target: "app::scoring",
        %username,
        %date,
        base_score,
        adjusted_score,
        "daily score computed"
    );

    DailyScore {
        username: username.to_string(),
        date,
        base_score,
        adjusted_score,
        total_score: base_score + adjusted_score,
    }
}

/// Mean total score over `[as_of - window_days, as_of]`, both bounds
/// inclusive. An empty window is `None`, never zero and never an error.
pub fn trailing_average(
    username: &str,
    as_of: NaiveDate,
    scores: &[DailyScore],
    window_days: i64,
) -> Option<f64> {
    let cutoff = as_of - Duration::days(window_days);
    let totals: Vec<f64> = scores
        .iter()
        .filter(|score| score.username == username && score.date >= cutoff && score.date <= as_of)
        .map(|score| score.total_score)
        .collect();

    if totals.is_empty() {
        None
    } else {
        Some(totals.iter().sum::<f64>() / totals.len() as f64)
    }
}
