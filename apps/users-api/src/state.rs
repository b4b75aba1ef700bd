//! Shared application state.

use domain_users::MongoUserRepository;
use mongodb::Client;

/// Shared application state.
///
/// Cloned into handlers; the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, shut down during graceful shutdown
    pub mongo_client: Client,
    /// Users repository; clones share its index setup
    pub users: MongoUserRepository,
}
