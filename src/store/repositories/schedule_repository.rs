use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::schedule::ScheduleEntry;
use crate::store::DataDir;
use crate::utils::time::{format_date, format_hm, parse_date, parse_time};

const SCHEDULE_TABLE: &str = "schedule";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub username: String,
    pub date: String,
    pub start_time: String,
}

impl ScheduleRow {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            username: entry.username.clone(),
            date: format_date(entry.date),
            start_time: format_hm(entry.start_time),
        }
    }

    pub fn into_entry(self) -> AppResult<ScheduleEntry> {
        Ok(ScheduleEntry {
            username: self.username,
            date: parse_date(&self.date)?,
            start_time: parse_time(&self.start_time)?,
        })
    }
}

pub struct ScheduleRepository;

impl ScheduleRepository {
    pub fn list_all(data: &DataDir) -> AppResult<Vec<ScheduleEntry>> {
        let rows: Vec<ScheduleRow> = data.read_rows(SCHEDULE_TABLE)?;
        rows.into_iter().map(ScheduleRow::into_entry).collect()
    }

    pub fn find_start_time(
        data: &DataDir,
        username: &str,
        date: NaiveDate,
    ) -> AppResult<Option<NaiveTime>> {
        let key = format_date(date);
        let rows: Vec<ScheduleRow> = data.read_rows(SCHEDULE_TABLE)?;
        rows.into_iter()
            .find(|row| row.username == username && row.date == key)
            .map(|row| parse_time(&row.start_time))
            .transpose()
    }

    /// Replaces any prior entry for the same (username, date) key.
    pub fn upsert(data: &DataDir, entry: &ScheduleEntry) -> AppResult<()> {
        let replacement = ScheduleRow::from_entry(entry);
        data.update_rows::<ScheduleRow, _>(SCHEDULE_TABLE, |rows| {
            let mut kept: Vec<ScheduleRow> = rows
                .into_iter()
                .filter(|row| !(row.username == replacement.username && row.date == replacement.date))
                .collect();
            kept.push(replacement);
            kept
        })
    }

    pub fn replace_all(data: &DataDir, entries: &[ScheduleEntry]) -> AppResult<()> {
        let rows: Vec<ScheduleRow> = entries.iter().map(ScheduleRow::from_entry).collect();
        data.update_rows::<ScheduleRow, _>(SCHEDULE_TABLE, |_| rows)
    }

    /// Loads an externally produced schedule CSV (the admin upload path) and
    /// swaps it in wholesale after validating every row.
    pub fn import_file(data: &DataDir, path: &Path) -> AppResult<usize> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ScheduleRow>, csv::Error>>()?;
        let entries = rows
            .into_iter()
            .map(ScheduleRow::into_entry)
            .collect::<AppResult<Vec<_>>>()?;
        Self::replace_all(data, &entries)?;
        Ok(entries.len())
    }
}
