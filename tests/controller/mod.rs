//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with a test session where possible, flows that depend on
//! cookies or multipart bodies go through the full router.

mod admin;
mod auth;
mod chat;
mod matches;
mod ticket;
