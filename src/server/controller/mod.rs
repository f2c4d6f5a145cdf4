//! HTTP controller endpoints for the travellersmeet web API.
//!
//! This module contains Axum handlers for authentication, tickets, ticket review, matching,
//! saved routes and the chat assistant. Controllers resolve the signed in user from the
//! tower-sessions session, hand the request to a service and convert the result into a JSON
//! response. Each handler carries a utoipa path annotation for the OpenAPI documentation.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod matches;
pub mod route;
pub mod ticket;
pub mod util;
