//! Sitecraft reminder API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! reminder dispatch, background sweep) so integration tests and the binary
//! entrypoint can both access them.

pub mod background;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
