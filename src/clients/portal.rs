//! Portal session relay.
//!
//! Owns one upstream session per call: performs the login handshake,
//! captures the resulting cookie state into an opaque token, and later
//! replays that token to fetch the attendance export and log out.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::COOKIE;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::SessionToken;

/// Marker the portal embeds in its login page when credentials are wrong.
///
/// The portal offers no structured error channel; a substring test
/// against the raw HTML body is the only available signal. If the portal
/// rewords the page, `login_rejected` is the one place to update.
const LOGIN_REJECTED_MARKER: &str = "Invalid";

/// Client for the upstream attendance portal.
pub struct PortalClient {
    login_url: Url,
    report_url: Url,
    logout_url: Url,
    user_agent: String,
    timeout: Duration,
}

impl PortalClient {
    /// Endpoint URLs are validated here so a bad config fails at startup,
    /// not on the first request.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            login_url: Url::parse(&config.login_url).context("invalid portal login url")?,
            report_url: Url::parse(&config.report_url).context("invalid portal report url")?,
            logout_url: Url::parse(&config.logout_url).context("invalid portal logout url")?,
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Submit credentials to the portal and capture the session.
    ///
    /// Empty credentials fail with `InvalidRequest` before any network
    /// activity. Transport failures and non-2xx responses become
    /// `UpstreamUnavailable`; a page carrying the rejection marker becomes
    /// `AuthRejected`. Anything else counts as an authenticated session.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidRequest);
        }

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .cookie_provider(jar.clone())
            .build()
            .map_err(Error::upstream)?;

        let form = [
            ("LoginForm[username]", username),
            ("LoginForm[password]", password),
            ("yt0", ""),
        ];
        let response = client
            .post(self.login_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(Error::upstream)?
            .error_for_status()
            .map_err(Error::upstream)?;

        let body = response.text().await.map_err(Error::upstream)?;
        if Self::login_rejected(&body) {
            return Err(Error::AuthRejected);
        }

        // The jar accumulated cookies across the whole redirect chain;
        // serialize what it would send back to the portal origin.
        let cookie_header = jar
            .cookies(&self.login_url)
            .and_then(|value| value.to_str().map(str::to_string).ok())
            .unwrap_or_default();
        debug!("captured portal session");
        Ok(SessionToken::from_cookie_header(&cookie_header))
    }

    /// Whether a login response page indicates rejected credentials.
    pub fn login_rejected(body: &str) -> bool {
        body.contains(LOGIN_REJECTED_MARKER)
    }

    /// Replay a captured session against the report export endpoint and
    /// return the raw CSV body.
    ///
    /// On success a best-effort logout runs against the same session; its
    /// failure never affects the returned report.
    pub async fn fetch_report(&self, token: &SessionToken) -> Result<String> {
        let cookie_header = token.as_cookie_header()?;
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(Error::upstream)?;

        let response = client
            .post(self.report_url.clone())
            .header(COOKIE, cookie_header.as_str())
            .form(&[("format", "csv")])
            .send()
            .await
            .map_err(Error::upstream)?
            .error_for_status()
            .map_err(Error::upstream)?;

        let body = response.text().await.map_err(Error::upstream)?;
        self.logout(&client, &cookie_header).await;
        Ok(body)
    }

    /// Fire-and-forget upstream hygiene.
    async fn logout(&self, client: &Client, cookie_header: &str) {
        if let Err(err) = client
            .get(self.logout_url.clone())
            .header(COOKIE, cookie_header)
            .send()
            .await
        {
            warn!("portal logout failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PortalClient {
        PortalClient::new(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn empty_credentials_fail_before_any_network_call() {
        let client = client();
        assert!(matches!(
            client.login("", "secret").await,
            Err(Error::InvalidRequest)
        ));
        assert!(matches!(
            client.login("alice", "").await,
            Err(Error::InvalidRequest)
        ));
    }

    #[test]
    fn rejection_marker_is_a_substring_test() {
        assert!(PortalClient::login_rejected(
            "<html><body>Invalid username or password.</body></html>"
        ));
        assert!(!PortalClient::login_rejected(
            "<html><body>Welcome back!</body></html>"
        ));
    }
}
