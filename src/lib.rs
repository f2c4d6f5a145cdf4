//! travellersmeet: ticket-verified traveller matching.
//!
//! `model` holds the DTOs shared across the HTTP surface and `server` the application itself.

pub mod model;
pub mod server;
