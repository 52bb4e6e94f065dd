mod api;
mod config;
mod dto;
mod loader;
mod state;

use crate::{config::Config, state::AppState};
use axum::routing::get;
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid BIKEFLOW_PORT: {err}");
            std::process::exit(1);
        }
    };

    info!("Loading data...");
    let now = Instant::now();
    let repository = match loader::load(&config).await {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load data: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} stations and {} trips in {:?}",
        repository.stations.len(),
        repository.trips.len(),
        now.elapsed()
    );
    let state = Arc::new(AppState::new(repository));

    let app = axum::Router::new()
        .route("/traffic", get(api::traffic))
        .route("/stations", get(api::stations))
        .route("/time", get(api::time))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {err}", config.port);
            std::process::exit(1);
        }
    };
    info!("Listening to port {}", config.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}
