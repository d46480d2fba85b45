use chrono::Local;
use serde::Serialize;

use crate::models::task::ChecklistItem;

use super::{AppState, CommandError, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResponse {
    pub date: String,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScoreResponse {
    pub date: String,
    pub base_score: f64,
    pub adjusted_score: f64,
    pub total_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_average: Option<f64>,
    pub message: String,
}

/// Today's routine tasks with previously saved ticks pre-applied.
pub fn checklist_fetch(state: &AppState, username: &str) -> CommandResult<ChecklistResponse> {
    let today = Local::now().date_naive();
    let items = state
        .scoring()
        .checklist_for(username, today)
        .map_err(CommandError::from)?;

    Ok(ChecklistResponse {
        date: today.format("%Y-%m-%d").to_string(),
        items,
    })
}

pub fn checklist_save(
    state: &AppState,
    username: &str,
    completed_task_ids: &[String],
) -> CommandResult<DailyScoreResponse> {
    let today = Local::now().date_naive();
    let summary = state
        .scoring()
        .save_checklist(username, today, completed_task_ids)
        .map_err(CommandError::from)?;

    let message = match summary.trailing_average {
        Some(average) => format!(
            "今日得分 {} 分（基础 {} + 调整 {}），最近 7 天平均 {:.1} 分",
            summary.score.total_score,
            summary.score.base_score,
            summary.score.adjusted_score,
            average
        ),
        None => format!(
            "今日得分 {} 分（基础 {} + 调整 {}），目前尚无足够资料计算 7 天平均",
            summary.score.total_score, summary.score.base_score, summary.score.adjusted_score
        ),
    };

    Ok(DailyScoreResponse {
        date: today.format("%Y-%m-%d").to_string(),
        base_score: summary.score.base_score,
        adjusted_score: summary.score.adjusted_score,
        total_score: summary.score.total_score,
        trailing_average: summary.trailing_average,
        message,
    })
}
