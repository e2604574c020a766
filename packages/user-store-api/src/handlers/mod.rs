//! HTTP endpoint implementations for the user collection.

pub mod request_utils;
pub mod response;
pub mod user_handlers;

pub use response::{error_response, ErrorResponse};
pub use user_handlers::{create_user, delete_user, get_user, list_users, update_user};
