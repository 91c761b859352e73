//! Slateboard gateway API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! routes, script runner) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod router;
pub mod routes;
pub mod scripting;
pub mod state;
