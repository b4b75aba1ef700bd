use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{RetryConfig, retry_with_backoff};
use domain_users::MongoUserRepository;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        "Using MongoDB at {} (mode: {})",
        config.mongodb.redacted_url(),
        config.environment.as_str()
    );

    // Only a malformed connection string fails here; the server is contacted on first use
    let mongo_client = database::mongodb::connect_lazy(&config.mongodb).await?;
    let db = database::mongodb::default_database(&mongo_client, &config.mongodb);

    info!("Using MongoDB database: {}", db.name());

    let state = AppState {
        config,
        mongo_client,
        users: MongoUserRepository::new(&db),
    };

    spawn_database_setup(&state);

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    info!("Starting Users API with graceful shutdown (30s timeout)");

    let client = state.mongo_client.clone();
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}

/// Verify connectivity and create the unique indexes in the background.
///
/// Failure is logged; requests keep being served and report database errors,
/// and the next write tries the indexes again.
fn spawn_database_setup(state: &AppState) {
    let client = state.mongo_client.clone();
    let repository = state.users.clone();

    tokio::spawn(async move {
        let connected = retry_with_backoff(
            || database::mongodb::ping(&client),
            RetryConfig::new().with_max_retries(5),
        )
        .await;

        if let Err(e) = connected {
            error!("MongoDB is unreachable, continuing without it: {}", e);
            return;
        }
        info!("Successfully connected to MongoDB");

        if let Err(e) = repository.ensure_indexes().await {
            error!("Failed to create user indexes, retrying on next write: {}", e);
        }
    });
}
