//! Session data models and storage.
//!
//! This module provides type-safe wrappers for session data stored through tower-sessions and
//! the database-backed session store that persists those sessions.

pub mod store;
pub mod user;
