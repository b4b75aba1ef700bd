//! Database connectors shared by the workspace's services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, connectivity checks
//! - `config` - Load [`mongodb::MongoConfig`] through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_lazy, default_database, ping};
//! use database::{RetryConfig, retry_with_backoff};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "users");
//! let client = connect_lazy(&config).await?;
//! retry_with_backoff(|| ping(&client), RetryConfig::default()).await?;
//! let db = default_database(&client, &config);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
