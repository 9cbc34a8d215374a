//! Dockforge HTTP API library.
//!
//! Exposes config, state, error handling, auth and routes so integration
//! tests and the binary entrypoint build the exact same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
