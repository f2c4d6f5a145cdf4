//! Helpers shared by the controllers.
//!
//! - `get_user` - Resolve the signed in user from the session and enforce the admin role

pub mod get_user;
