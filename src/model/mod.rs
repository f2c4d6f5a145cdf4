//! Request and response DTOs shared by the HTTP API.
//!
//! These types are the JSON contract of the service. They are deliberately separate from the
//! SeaORM entities so the database schema can change without breaking API consumers.

pub mod api;
pub mod chat;
pub mod route;
pub mod ticket;
pub mod user;
