use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Administrator-entered signed delta; several rows per (username, date) are
/// allowed and summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAdjustment {
    pub username: String,
    pub date: NaiveDate,
    pub score: f64,
}

/// Derived daily total, keyed by (username, date); recomputing replaces the
/// prior record for the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    pub username: String,
    pub date: NaiveDate,
    pub base_score: f64,
    pub adjusted_score: f64,
    pub total_score: f64,
}
