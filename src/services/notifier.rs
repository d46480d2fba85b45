use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::{AppError, AppResult};

/// Outbound notification seam. Delivery is best-effort: callers log failures
/// and move on, nothing is queued or retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> AppResult<()>;
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| AppError::other(format!("构建 HTTP 客户端失败: {err}")))?;

        let base = config.api_base.trim_end_matches('/');
        Ok(Self {
            client,
            endpoint: format!("{}/bot{}/sendMessage", base, config.bot_token),
            chat_id: config.chat_id.clone(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", message)])
            .send()
            .await
            .map_err(|err| AppError::notify(format!("发送请求失败: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::notify(format!("发送失败: {status} - {body}")));
        }

        debug!(target: "app::notify", "telegram message delivered");
        Ok(())
    }
}
