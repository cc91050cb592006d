use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Caller credentials for one login call. Never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Opaque serialized upstream session state.
///
/// The wire form is a JSON object mapping cookie name to value, captured
/// from the portal's login response and replayed as a `Cookie` header on
/// every later request. The relay never inspects the cookies themselves;
/// validity is only discovered when the next fetch fails upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        SessionToken(raw.into())
    }

    /// Build a token from a `Cookie`-header-shaped string
    /// (`name=value; name2=value2`), as produced by the login cookie jar.
    pub fn from_cookie_header(header: &str) -> Self {
        let cookies: BTreeMap<&str, &str> = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .collect();
        // A string-keyed map always serializes.
        let json = serde_json::to_string(&cookies).unwrap_or_else(|_| "{}".to_string());
        SessionToken(json)
    }

    /// Rebuild the `Cookie` header value for replay.
    ///
    /// A token that does not decode into a cookie map is no session at all.
    pub fn as_cookie_header(&self) -> Result<String> {
        let cookies: BTreeMap<String, String> =
            serde_json::from_str(&self.0).map_err(|_| Error::Unauthorized)?;
        Ok(cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
