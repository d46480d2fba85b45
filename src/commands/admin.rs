use std::path::Path;

use serde::Serialize;

use crate::models::clock::ClockEvent;
use crate::models::issue::{IssueRecord, IssueStatus};
use crate::models::schedule::ScheduleEntry;
use crate::models::score::ScoreAdjustment;
use crate::utils::time::{parse_date, parse_time};

use super::{AppState, CommandError, CommandResult};

pub const DEFAULT_CLOCK_LOG_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleImportResponse {
    pub imported: usize,
}

pub fn schedule_list(state: &AppState) -> CommandResult<Vec<ScheduleEntry>> {
    state.schedule().list_all().map_err(CommandError::from)
}

pub fn schedule_upsert(
    state: &AppState,
    username: &str,
    date: &str,
    start_time: &str,
) -> CommandResult<ScheduleEntry> {
    let entry = ScheduleEntry {
        username: username.to_string(),
        date: parse_date(date).map_err(CommandError::from)?,
        start_time: parse_time(start_time).map_err(CommandError::from)?,
    };
    state
        .schedule()
        .upsert_entry(&entry)
        .map_err(CommandError::from)?;
    Ok(entry)
}

pub fn schedule_import(state: &AppState, path: &Path) -> CommandResult<ScheduleImportResponse> {
    let imported = state
        .schedule()
        .import_csv(path)
        .map_err(CommandError::from)?;
    Ok(ScheduleImportResponse { imported })
}

pub fn clock_log_recent(
    state: &AppState,
    limit: Option<usize>,
) -> CommandResult<Vec<ClockEvent>> {
    state
        .attendance()
        .recent_log(limit.unwrap_or(DEFAULT_CLOCK_LOG_LIMIT))
        .map_err(CommandError::from)
}

pub fn issues_list_all(state: &AppState) -> CommandResult<Vec<IssueRecord>> {
    state.issues().list_all().map_err(CommandError::from)
}

pub fn issue_set_status(
    state: &AppState,
    id: &str,
    status: &str,
) -> CommandResult<IssueRecord> {
    let status = IssueStatus::parse(status).map_err(CommandError::from)?;
    state
        .issues()
        .update_status(id, status)
        .map_err(CommandError::from)
}

pub fn adjustment_add(
    state: &AppState,
    username: &str,
    date: &str,
    score: f64,
) -> CommandResult<ScoreAdjustment> {
    let adjustment = ScoreAdjustment {
        username: username.to_string(),
        date: parse_date(date).map_err(CommandError::from)?,
        score,
    };
    state
        .scoring()
        .add_adjustment(&adjustment)
        .map_err(CommandError::from)?;
    Ok(adjustment)
}
