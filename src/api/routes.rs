use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::orchestrator::App;

pub fn router(app: Arc<App>) -> Router {
    // Callers are browser frontends on other origins. The session travels
    // in a header rather than a cookie, so requests carry no credentials
    // and any origin can be allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(handlers::SESSION_TOKEN_HEADER),
        ]);

    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/attendance", get(handlers::attendance))
        .layer(cors)
        .with_state(app)
}
