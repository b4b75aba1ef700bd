//! Custom extractors for Axum handlers.

pub mod form_or_json;
pub mod uuid_path;

pub use form_or_json::FormOrJson;
pub use uuid_path::UuidPath;
