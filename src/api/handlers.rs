use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Error;
use crate::models::{AttendanceSummary, Credentials, SessionToken};
use crate::orchestrator::App;

/// Header the caller sends the session token back in after login.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Login request body.
///
/// Fields are optional so that an absent field maps to the same 400 as
/// an empty one, instead of surfacing as the extractor's 422.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    fn into_credentials(self) -> Result<Credentials, Error> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(Error::InvalidRequest),
        }
    }
}

pub async fn login(
    State(app): State<Arc<App>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    // A body that isn't valid JSON is a malformed request, not a server
    // fault.
    let Json(request) = payload.map_err(|_| Error::InvalidRequest)?;
    let credentials = request.into_credentials()?;
    let token = app.login(&credentials).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
    })))
}

pub async fn attendance(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<AttendanceSummary>, Error> {
    let token = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(SessionToken::new);
    let summary = app.get_attendance(token.as_ref()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use crate::config::Config;

    fn app() -> Arc<App> {
        Arc::new(App::new(&Config::default()).unwrap())
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/login")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn body_missing_a_field_still_extracts() {
        let request = json_request(r#"{"username":"alice"}"#);
        let Json(payload) = Json::<LoginRequest>::from_request(request, &())
            .await
            .expect("optional fields absorb a missing key");
        assert_eq!(payload.username.as_deref(), Some("alice"));
        assert!(payload.password.is_none());
    }

    #[tokio::test]
    async fn missing_password_is_a_400() {
        let request = json_request(r#"{"username":"alice"}"#);
        let payload = Json::<LoginRequest>::from_request(request, &()).await;
        let response = login(State(app()), payload).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_400() {
        let request = json_request("not json at all");
        let payload = Json::<LoginRequest>::from_request(request, &()).await;
        let response = login(State(app()), payload).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
