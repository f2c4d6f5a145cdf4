//! Data access layer.
//!
//! Repositories wrap SeaORM queries for a single entity each. They take a borrowed
//! `DatabaseConnection`, return `DbErr` on failure, and contain no business rules; validation and
//! authorization live in the service layer.

pub mod route;
pub mod session;
pub mod ticket;
pub mod user;
