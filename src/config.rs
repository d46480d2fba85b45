use std::env;
use std::path::PathBuf;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram bot credentials for the issue-report notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Override point for tests; defaults to the public API host.
    pub api_base: String,
}

/// Explicit runtime configuration. Services never read the environment or
/// the clock themselves; everything ambient is resolved here and passed in.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub log_dir: PathBuf,
    pub telegram: Option<TelegramConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var("PUNCHCLOCK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let uploads_dir = env::var("PUNCHCLOCK_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        let log_dir = env::var("PUNCHCLOCK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("logs"));

        let telegram = match (env::var("TELE_BOT_TOKEN"), env::var("TELE_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig {
                bot_token,
                chat_id,
                api_base: env::var("TELE_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string()),
            }),
            _ => None,
        };

        Self {
            data_dir,
            uploads_dir,
            log_dir,
            telegram,
        }
    }
}
