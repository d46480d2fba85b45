pub mod admin;
pub mod attendance;
pub mod auth;
pub mod issues;
pub mod tasks;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::error;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::attendance_service::AttendanceService;
use crate::services::auth_service::AuthService;
use crate::services::issue_service::IssueService;
use crate::services::notifier::{Notifier, TelegramNotifier};
use crate::services::schedule_service::ScheduleService;
use crate::services::scoring_service::ScoringService;
use crate::store::DataDir;

#[derive(Clone)]
pub struct AppState {
    data: DataDir,
    attendance_service: Arc<AttendanceService>,
    scoring_service: Arc<ScoringService>,
    schedule_service: Arc<ScheduleService>,
    issue_service: Arc<IssueService>,
    auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let data = DataDir::new(&config.data_dir)?;
        let notifier: Option<Arc<dyn Notifier>> = match &config.telegram {
            Some(telegram) => Some(Arc::new(TelegramNotifier::new(telegram)?)),
            None => None,
        };
        Self::with_notifier(data, &config.uploads_dir, notifier)
    }

    /// Seam for tests: inject a mock notifier or none at all.
    pub fn with_notifier(
        data: DataDir,
        uploads_dir: &Path,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> AppResult<Self> {
        let attendance_service = Arc::new(AttendanceService::new(data.clone()));
        let scoring_service = Arc::new(ScoringService::new(data.clone()));
        let schedule_service = Arc::new(ScheduleService::new(data.clone()));
        let issue_service = Arc::new(IssueService::new(
            data.clone(),
            uploads_dir.to_path_buf(),
            notifier,
        ));
        let auth_service = Arc::new(AuthService::new(data.clone()));

        Ok(Self {
            data,
            attendance_service,
            scoring_service,
            schedule_service,
            issue_service,
            auth_service,
        })
    }

    pub fn attendance(&self) -> Arc<AttendanceService> {
        Arc::clone(&self.attendance_service)
    }

    pub fn scoring(&self) -> Arc<ScoringService> {
        Arc::clone(&self.scoring_service)
    }

    pub fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule_service)
    }

    pub fn issues(&self) -> Arc<IssueService> {
        Arc::clone(&self.issue_service)
    }

    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth_service)
    }

    pub fn data(&self) -> DataDir {
        self.data.clone()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => CommandError::new("NOT_FOUND", "请求的资源不存在", None),
            AppError::Notify(message) => CommandError::new("NOTIFY_FAILED", message, None),
            AppError::Store { message } => {
                error!(target: "app::command", %message, "store error in command");
                CommandError::new("STORE_ERROR", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "序列化失败", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "文件系统读写失败", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}
