use std::{env, net::SocketAddr};

use anyhow::{Context, Result};
use axum::http::HeaderValue;

/// Server configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, from `TRIPS_LISTEN_ADDR` (default `127.0.0.1:4000`).
    pub listen_addr: SocketAddr,
    /// Single allowed CORS origin, from `TRIPS_ALLOWED_ORIGIN`. When unset
    /// any origin is allowed, which is what local development wants.
    pub allowed_origin: Option<HeaderValue>,
    /// Populate the store with a few sample trips on startup, from
    /// `TRIPS_SEED_DEMO`. Off by default; the store starts empty.
    pub seed_demo: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("TRIPS_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:4000".to_string())
            .parse()
            .context("invalid TRIPS_LISTEN_ADDR")?;

        let allowed_origin = match env::var("TRIPS_ALLOWED_ORIGIN") {
            Ok(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .context("invalid TRIPS_ALLOWED_ORIGIN")?,
            ),
            Err(_) => None,
        };

        let seed_demo = env::var("TRIPS_SEED_DEMO")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            allowed_origin,
            seed_demo,
        })
    }
}
