use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::score::ScoreAdjustment;
use crate::store::DataDir;
use crate::utils::time::{format_date, parse_date};

const ADJUSTMENTS_TABLE: &str = "score_adjustments";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentRow {
    pub username: String,
    pub date: String,
    pub score: f64,
}

impl AdjustmentRow {
    pub fn from_adjustment(adjustment: &ScoreAdjustment) -> Self {
        Self {
            username: adjustment.username.clone(),
            date: format_date(adjustment.date),
            score: adjustment.score,
        }
    }

    pub fn into_adjustment(self) -> AppResult<ScoreAdjustment> {
        Ok(ScoreAdjustment {
            username: self.username,
            date: parse_date(&self.date)?,
            score: self.score,
        })
    }
}

pub struct AdjustmentRepository;

impl AdjustmentRepository {
    pub fn append(data: &DataDir, adjustment: &ScoreAdjustment) -> AppResult<()> {
        data.append_row(ADJUSTMENTS_TABLE, &AdjustmentRow::from_adjustment(adjustment))
    }

    pub fn list_for(
        data: &DataDir,
        username: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ScoreAdjustment>> {
        let key = format_date(date);
        let rows: Vec<AdjustmentRow> = data.read_rows(ADJUSTMENTS_TABLE)?;
        rows.into_iter()
            .filter(|row| row.username == username && row.date == key)
            .map(AdjustmentRow::into_adjustment)
            .collect()
    }

    /// Zero when the table is missing or holds no matching rows.
    pub fn sum_for(data: &DataDir, username: &str, date: NaiveDate) -> AppResult<f64> {
        let adjustments = Self::list_for(data, username, date)?;
        Ok(adjustments.iter().map(|adjustment| adjustment.score).sum())
    }
}
