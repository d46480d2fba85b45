use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockStatus {
    In,
    Out,
}

impl ClockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockStatus::In => "in",
            ClockStatus::Out => "out",
        }
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim() {
            "in" => Ok(ClockStatus::In),
            "out" => Ok(ClockStatus::Out),
            other => Err(AppError::validation(format!("未知的打卡状态: {other}"))),
        }
    }
}

/// Append-only log entry; a person may clock in several times a day, the raw
/// log keeps every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockEvent {
    pub username: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: ClockStatus,
}

/// Outcome of the lateness evaluation for a clock-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatenessCheck {
    pub is_late: bool,
    pub message: String,
}
