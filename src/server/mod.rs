//! Server application core modules.
//!
//! This module contains all server-side functionality for travellersmeet, including HTTP
//! routing, session authentication, database operations, external email and assistant
//! providers, and scheduled maintenance jobs.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
