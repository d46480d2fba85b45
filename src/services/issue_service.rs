use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::issue::{IssueRecord, IssueReportInput, IssueStatus, ISSUE_TYPES};
use crate::services::notifier::Notifier;
use crate::store::repositories::issue_repository::IssueRepository;
use crate::store::DataDir;
use crate::utils::time::{format_date, format_hm};

/// The upload form accepts several photos per report, capped here.
pub const MAX_PHOTOS: usize = 5;

const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReportOutcome {
    pub issue: IssueRecord,
    /// Whether the best-effort notification went out. Delivery failure never
    /// fails the report itself.
    pub notified: bool,
}

#[derive(Clone)]
pub struct IssueService {
    data: DataDir,
    uploads_dir: PathBuf,
    notifier: Option<Arc<dyn Notifier>>,
}

impl IssueService {
    pub fn new(data: DataDir, uploads_dir: PathBuf, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            data,
            uploads_dir,
            notifier,
        }
    }

    pub async fn report(
        &self,
        input: IssueReportInput,
        at: NaiveDateTime,
    ) -> AppResult<IssueReportOutcome> {
        validate_report(&input)?;

        let date = at.date();
        let mut image_paths = Vec::with_capacity(input.photos.len());
        for photo in &input.photos {
            image_paths.push(self.store_photo(photo, &input.username, &format_date(date))?);
        }

        let record = IssueRecord {
            id: Uuid::new_v4().to_string(),
            username: input.username,
            date,
            time: at.time(),
            issue_type: input.issue_type,
            description: input.description,
            image_paths,
            status: IssueStatus::Pending,
        };
        IssueRepository::append(&self.data, &record)?;
        info!(target: "app::issue", issue_id = %record.id, username = %record.username, "issue reported");

        let notified = self.notify_new_issue(&record).await;

        Ok(IssueReportOutcome {
            issue: record,
            notified,
        })
    }

    pub fn list_for_user(&self, username: &str) -> AppResult<Vec<IssueRecord>> {
        IssueRepository::list_for_user(&self.data, username)
    }

    pub fn list_all(&self) -> AppResult<Vec<IssueRecord>> {
        IssueRepository::list_all(&self.data)
    }

    pub fn update_status(&self, id: &str, status: IssueStatus) -> AppResult<IssueRecord> {
        let updated = IssueRepository::update_status(&self.data, id, status)?;
        info!(
            target: "app::issue",
            issue_id = %updated.id,
            status = status.as_str(),
            "issue status updated"
        );
        Ok(updated)
    }

    /// Copies an uploaded photo into the uploads directory under a
    /// collision-free name: `{date}_{username}_{6-hex}.{ext}`.
    fn store_photo(&self, source: &Path, username: &str, date: &str) -> AppResult<String> {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| AppError::validation("图片文件缺少扩展名"))?;
        if !ALLOWED_PHOTO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::validation(format!(
                "不支持的图片格式: {extension}（仅限 png/jpg/jpeg）"
            )));
        }

        std::fs::create_dir_all(&self.uploads_dir)?;
        let tag = Uuid::new_v4().simple().to_string();
        let filename = format!("{date}_{username}_{}.{extension}", &tag[..6]);
        let destination = self.uploads_dir.join(&filename);
        std::fs::copy(source, &destination)?;

        Ok(destination.to_string_lossy().into_owned())
    }

    async fn notify_new_issue(&self, record: &IssueRecord) -> bool {
        let Some(notifier) = &self.notifier else {
            return false;
        };

        let message = format!(
            "新的问题回报\n员工: {}\n日期: {}\n时间: {}\n类型: {}\n描述: {}",
            record.username,
            format_date(record.date),
            format_hm(record.time),
            record.issue_type,
            record.description
        );

        match notifier.send(&message).await {
            Ok(()) => true,
            Err(err) => {
                // Fire-and-forget: surface the failure to the caller via the
                // outcome flag only.
                warn!(target: "app::notify", error = %err, "issue notification failed");
                false
            }
        }
    }
}

fn validate_report(input: &IssueReportInput) -> AppResult<()> {
    if input.username.trim().is_empty() {
        return Err(AppError::validation("缺少员工账号"));
    }
    if !ISSUE_TYPES.contains(&input.issue_type.as_str()) {
        return Err(AppError::validation(format!(
            "未知的问题类型: {}",
            input.issue_type
        )));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::validation("请填写问题描述"));
    }
    if input.photos.len() > MAX_PHOTOS {
        return Err(AppError::validation_with_details(
            format!("最多上传 {MAX_PHOTOS} 张图片"),
            serde_json::json!({ "count": input.photos.len(), "max": MAX_PHOTOS }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> IssueReportInput {
        IssueReportInput {
            username: "amy".into(),
            issue_type: "机台".into(),
            description: "咖啡机漏水".into(),
            photos: Vec::new(),
        }
    }

    #[test]
    fn accepts_a_valid_report() {
        assert!(validate_report(&input()).is_ok());
    }

    #[test]
    fn rejects_unknown_issue_type() {
        let mut report = input();
        report.issue_type = "外星人".into();
        assert!(validate_report(&report).is_err());
    }

    #[test]
    fn rejects_blank_description() {
        let mut report = input();
        report.description = "   ".into();
        assert!(validate_report(&report).is_err());
    }

    #[test]
    fn rejects_too_many_photos() {
        let mut report = input();
        report.photos = (0..6).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        assert!(validate_report(&report).is_err());
    }
}
