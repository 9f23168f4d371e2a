//! # rpa-ai-server
//!
//! HTTP surface for the writing-assistant pages. Clients open a session, store
//! their OpenAI key on it and then render or submit pages by task id. The
//! document page additionally accepts a PDF upload.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::{
    config::{get_config, AppConfig},
    router::create_router,
    state::build_app_state,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

/// Serves the page routes on `listener` until the process stops.
///
/// The completion client and the per-task prompt profiles are resolved from
/// `config` before the first request is accepted. Sessions start empty.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config).await?;
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Entry point of the `server` binary.
///
/// Reads `.env`, installs the `RUST_LOG`-filtered subscriber, loads `config.yml`
/// and `prompt.yml` with their `RPA_*` and `PORT` overrides, then binds every
/// interface on the configured port.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = get_config(None)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    run(listener, config).await
}
