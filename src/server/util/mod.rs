//! Utility functions shared across the server.
//!
//! - `password` - Argon2 password hashing and verification
//! - `polyline` - Google encoded polyline codec used by saved routes
//! - `time` - Conversions between chrono and `time` timestamps
//! - `validate` - Input validation helpers for request payloads

pub mod password;
pub mod polyline;
pub mod time;
pub mod validate;
