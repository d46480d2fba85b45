use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::clock::{ClockEvent, ClockStatus};
use crate::store::DataDir;
use crate::utils::time::{format_date, format_hms, parse_date, parse_time};

const CLOCK_TABLE: &str = "clock_logs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRow {
    pub username: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl ClockRow {
    pub fn from_event(event: &ClockEvent) -> Self {
        Self {
            username: event.username.clone(),
            date: format_date(event.date),
            time: format_hms(event.time),
            status: event.status.as_str().to_string(),
        }
    }

    pub fn into_event(self) -> AppResult<ClockEvent> {
        Ok(ClockEvent {
            username: self.username,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            status: ClockStatus::parse(&self.status)?,
        })
    }
}

pub struct ClockRepository;

impl ClockRepository {
    pub fn append(data: &DataDir, event: &ClockEvent) -> AppResult<()> {
        data.append_row(CLOCK_TABLE, &ClockRow::from_event(event))
    }

    /// Tail of the raw log in file order, newest last.
    pub fn list_recent(data: &DataDir, limit: usize) -> AppResult<Vec<ClockEvent>> {
        let rows: Vec<ClockRow> = data.read_rows(CLOCK_TABLE)?;
        let skip = rows.len().saturating_sub(limit);
        rows.into_iter().skip(skip).map(ClockRow::into_event).collect()
    }

    pub fn list_for(data: &DataDir, username: &str, date: NaiveDate) -> AppResult<Vec<ClockEvent>> {
        let key = format_date(date);
        let rows: Vec<ClockRow> = data.read_rows(CLOCK_TABLE)?;
        rows.into_iter()
            .filter(|row| row.username == username && row.date == key)
            .map(ClockRow::into_event)
            .collect()
    }
}
