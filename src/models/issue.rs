use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const ISSUE_TYPES: &[&str] = &["机台", "客人", "店面", "其他"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    #[serde(rename = "未处理")]
    Pending,
    #[serde(rename = "处理中")]
    InProgress,
    #[serde(rename = "已完成")]
    Resolved,
}

impl IssueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Pending => "未处理",
            IssueStatus::InProgress => "处理中",
            IssueStatus::Resolved => "已完成",
        }
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim() {
            "未处理" => Ok(IssueStatus::Pending),
            "处理中" => Ok(IssueStatus::InProgress),
            "已完成" => Ok(IssueStatus::Resolved),
            other => Err(AppError::validation(format!("未知的问题状态: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: String,
    pub username: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub issue_type: String,
    pub description: String,
    /// Relative paths of stored photo copies, at most [`crate::services::issue_service::MAX_PHOTOS`].
    pub image_paths: Vec<String>,
    pub status: IssueStatus,
}

/// Employee-submitted report before it is assigned an id and timestamp.
#[derive(Debug, Clone, Default)]
pub struct IssueReportInput {
    pub username: String,
    pub issue_type: String,
    pub description: String,
    pub photos: Vec<PathBuf>,
}
