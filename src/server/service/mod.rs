//! Service layer for business logic.
//!
//! Services validate request input, coordinate repositories and talk to external providers.
//! Controllers stay thin and only translate between HTTP and these services.

pub mod auth;
pub mod chat;
pub mod email;
pub mod matches;
pub mod otp;
pub mod route;
pub mod ticket;
