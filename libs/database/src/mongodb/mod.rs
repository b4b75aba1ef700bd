//! MongoDB connection management
//!
//! Client construction from [`MongoConfig`], the `ping` connectivity
//! check, and database selection.

mod config;
mod connector;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, connect_lazy, default_database, ping};
