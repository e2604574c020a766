//! Core storage for the user registry.
//!
//! Provides the user record model, the in-memory ordered store,
//! identifier generation and format checks, and server configuration.

pub mod config;
pub mod error;
pub mod id;
pub mod store;
pub mod user;

pub use error::StoreError;
pub use store::UserStore;
pub use user::{NewUser, User, UserPatch};
