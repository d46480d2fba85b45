use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::issue::{IssueRecord, IssueStatus};
use crate::store::DataDir;
use crate::utils::time::{format_date, format_hms, parse_date, parse_time};

const ISSUES_TABLE: &str = "issue_logs";

/// Photo paths are stored `;`-joined in one CSV field.
const IMAGE_PATH_SEPARATOR: char = ';';

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRow {
    pub id: String,
    pub username: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub description: String,
    pub image_paths: String,
    pub status: String,
}

impl IssueRow {
    pub fn from_record(record: &IssueRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            date: format_date(record.date),
            time: format_hms(record.time),
            issue_type: record.issue_type.clone(),
            description: record.description.clone(),
            image_paths: record
                .image_paths
                .join(&IMAGE_PATH_SEPARATOR.to_string()),
            status: record.status.as_str().to_string(),
        }
    }

    pub fn into_record(self) -> AppResult<IssueRecord> {
        let image_paths = if self.image_paths.is_empty() {
            Vec::new()
        } else {
            self.image_paths
                .split(IMAGE_PATH_SEPARATOR)
                .map(str::to_string)
                .collect()
        };

        Ok(IssueRecord {
            id: self.id,
            username: self.username,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            issue_type: self.issue_type,
            description: self.description,
            image_paths,
            status: IssueStatus::parse(&self.status)?,
        })
    }
}

pub struct IssueRepository;

impl IssueRepository {
    pub fn append(data: &DataDir, record: &IssueRecord) -> AppResult<()> {
        data.append_row(ISSUES_TABLE, &IssueRow::from_record(record))
    }

    /// One user's reports, newest first.
    pub fn list_for_user(data: &DataDir, username: &str) -> AppResult<Vec<IssueRecord>> {
        let rows: Vec<IssueRow> = data.read_rows(ISSUES_TABLE)?;
        let mut records = rows
            .into_iter()
            .filter(|row| row.username == username)
            .map(IssueRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Every report, newest first (admin view).
    pub fn list_all(data: &DataDir) -> AppResult<Vec<IssueRecord>> {
        let rows: Vec<IssueRow> = data.read_rows(ISSUES_TABLE)?;
        let mut records = rows
            .into_iter()
            .map(IssueRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub fn update_status(
        data: &DataDir,
        id: &str,
        status: IssueStatus,
    ) -> AppResult<IssueRecord> {
        let mut updated: Option<IssueRow> = None;
        data.update_rows::<IssueRow, _>(ISSUES_TABLE, |rows| {
            rows.into_iter()
                .map(|mut row| {
                    if row.id == id {
                        row.status = status.as_str().to_string();
                        updated = Some(row.clone());
                    }
                    row
                })
                .collect()
        })?;

        updated
            .ok_or_else(AppError::not_found)
            .and_then(IssueRow::into_record)
    }
}

fn sort_newest_first(records: &mut [IssueRecord]) {
    records.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
}
