use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use crate::models::issue::{IssueRecord, IssueReportInput};

use super::{AppState, CommandError, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReportResponse {
    pub issue: IssueRecord,
    pub notified: bool,
    pub message: String,
}

pub async fn issue_report(
    state: &AppState,
    username: &str,
    issue_type: &str,
    description: &str,
    photos: Vec<PathBuf>,
) -> CommandResult<IssueReportResponse> {
    let now = Local::now().naive_local();
    let outcome = state
        .issues()
        .report(
            IssueReportInput {
                username: username.to_string(),
                issue_type: issue_type.to_string(),
                description: description.to_string(),
                photos,
            },
            now,
        )
        .await
        .map_err(CommandError::from)?;

    let message = if outcome.notified {
        "问题已送出，通知已发送".to_string()
    } else {
        "问题已送出".to_string()
    };

    Ok(IssueReportResponse {
        issue: outcome.issue,
        notified: outcome.notified,
        message,
    })
}

/// The caller's own reports, newest first.
pub fn issues_list_mine(state: &AppState, username: &str) -> CommandResult<Vec<IssueRecord>> {
    state
        .issues()
        .list_for_user(username)
        .map_err(CommandError::from)
}
