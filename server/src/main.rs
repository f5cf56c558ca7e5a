mod backend;
mod config;

use anyhow::Result;
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use crate::backend::{create_router, initialize_backend, seed_demo_trips};
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ServerConfig::from_env()?;
    let app_state = initialize_backend();
    if config.seed_demo {
        seed_demo_trips(&app_state);
    }
    let app = create_router(app_state, &config);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("Trip planner API listening on {}", listener.local_addr()?);
    serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
