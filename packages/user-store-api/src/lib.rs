//! REST API server for the in-memory user store.
//!
//! Provides the `/api/users` CRUD endpoints, request routing,
//! and the hyper connection loop.

pub mod handlers;
pub mod router;
pub mod server;
