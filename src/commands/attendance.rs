use chrono::Local;
use serde::Serialize;

use super::{AppState, CommandError, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInResponse {
    pub is_late: bool,
    pub message: String,
    pub clocked_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutResponse {
    pub message: String,
    pub clocked_at: String,
}

/// The timestamp is sampled once here and passed down; the service judges
/// lateness against the event's own date.
pub fn clock_in(state: &AppState, username: &str) -> CommandResult<ClockInResponse> {
    let now = Local::now().naive_local();
    let check = state
        .attendance()
        .clock_in(username, now)
        .map_err(CommandError::from)?;

    Ok(ClockInResponse {
        is_late: check.is_late,
        message: check.message,
        clocked_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

pub fn clock_out(state: &AppState, username: &str) -> CommandResult<ClockOutResponse> {
    let now = Local::now().naive_local();
    state
        .attendance()
        .clock_out(username, now)
        .map_err(CommandError::from)?;

    Ok(ClockOutResponse {
        message: "下班打卡成功".to_string(),
        clocked_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}
