//! Database fixtures for users, tickets and routes.
//!
//! Each fixture group is reached through an accessor on [`TestSetup`](crate::TestSetup), e.g.
//! `test.user().insert_user("a@example.com")`.

pub mod route;
pub mod ticket;
pub mod user;
