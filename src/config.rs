/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP layer binds to
    pub bind_addr: String,
    /// Portal login endpoint
    pub login_url: String,
    /// Portal attendance report export endpoint
    pub report_url: String,
    /// Portal logout endpoint
    pub logout_url: String,
    /// User agent sent on every portal request
    pub user_agent: String,
    /// Portal request timeout in seconds
    pub request_timeout_secs: u64,
    /// Path of the subject code → display name table
    pub courses_file: String,
    // --- Telegram side channel ---
    /// Bot token; empty disables the side channel
    pub telegram_bot_token: String,
    /// Chat id the login attempts are sent to
    pub telegram_chat_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            login_url: "https://sahrdaya.etlab.in/user/login".to_string(),
            report_url:
                "https://sahrdaya.etlab.in/ktuacademics/student/viewattendancesubjectdutyleave/25672501090"
                    .to_string(),
            logout_url: "https://sahrdaya.etlab.in/user/logout".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 10,
            courses_file: "courses.json".to_string(),
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            login_url: std::env::var("PORTAL_LOGIN_URL").unwrap_or(default.login_url),
            report_url: std::env::var("PORTAL_REPORT_URL").unwrap_or(default.report_url),
            logout_url: std::env::var("PORTAL_LOGOUT_URL").unwrap_or(default.logout_url),
            user_agent: std::env::var("PORTAL_USER_AGENT").unwrap_or(default.user_agent),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            courses_file: std::env::var("COURSES_FILE").unwrap_or(default.courses_file),
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or(default.telegram_bot_token),
            telegram_chat_id: std::env::var("TELEGRAM_CHAT_ID").unwrap_or(default.telegram_chat_id),
        }
    }
}
