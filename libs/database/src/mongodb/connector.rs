use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::time::Duration;

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Parse the connection string and apply pool and timeout settings
async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Build a client without contacting the server.
///
/// The driver connects on first use, so this only fails for a malformed
/// connection string or invalid options.
pub async fn connect_lazy(config: &MongoConfig) -> Result<Client, MongoError> {
    let options = client_options(config).await?;
    Ok(Client::with_options(options)?)
}

/// Round-trip a `ping` command to verify the server is reachable
pub async fn ping(client: &Client) -> Result<(), MongoError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// The database named in the connection string, or `config.database` if it has none
pub fn default_database(client: &Client, config: &MongoConfig) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database(config.database()))
}
