//! Standard plain-text messages for error responses.

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_UUID: &str = "Invalid id";
pub const NOT_FOUND_RESOURCE: &str = "The requested resource was not found";
