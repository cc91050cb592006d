use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use attendance_relay::api;
use attendance_relay::orchestrator::App;
use attendance_relay::utils::logging;
use attendance_relay::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .context("invalid bind address")?;

    let app = Arc::new(App::new(&config)?);
    let router = api::routes::router(app);

    info!("attendance relay listening on {addr}");
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
