use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::score::DailyScore;
use crate::store::DataDir;
use crate::utils::time::{format_date, parse_date};

const SCORES_TABLE: &str = "score_logs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRow {
    pub username: String,
    pub date: String,
    pub base_score: f64,
    pub adjusted_score: f64,
    pub total_score: f64,
}

impl ScoreRow {
    pub fn from_score(score: &DailyScore) -> Self {
        Self {
            username: score.username.clone(),
            date: format_date(score.date),
            base_score: score.base_score,
            adjusted_score: score.adjusted_score,
            total_score: score.total_score,
        }
    }

    pub fn into_score(self) -> AppResult<DailyScore> {
        Ok(DailyScore {
            username: self.username,
            date: parse_date(&self.date)?,
            base_score: self.base_score,
            adjusted_score: self.adjusted_score,
            total_score: self.total_score,
        })
    }
}

pub struct ScoreRepository;

impl ScoreRepository {
    /// At most one authoritative row per (username, date): prior rows for the
    /// key are filtered out before the fresh one is appended.
    pub fn upsert(data: &DataDir, score: &DailyScore) -> AppResult<()> {
        let replacement = ScoreRow::from_score(score);
        data.update_rows::<ScoreRow, _>(SCORES_TABLE, |rows| {
            let mut kept: Vec<ScoreRow> = rows
                .into_iter()
                .filter(|row| !(row.username == replacement.username && row.date == replacement.date))
                .collect();
            kept.push(replacement);
            kept
        })
    }

    pub fn list_for_user(data: &DataDir, username: &str) -> AppResult<Vec<DailyScore>> {
        let rows: Vec<ScoreRow> = data.read_rows(SCORES_TABLE)?;
        rows.into_iter()
            .filter(|row| row.username == username)
            .map(ScoreRow::into_score)
            .collect()
    }
}
