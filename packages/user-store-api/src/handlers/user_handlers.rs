//! User CRUD endpoint handlers.

use std::fmt::Display;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};

use super::request_utils::{
    build_empty_response, json_response, map_store_error, parse_create_request,
    parse_update_request, parse_user_id, read_request_body,
};

/// Lists every user.
///
/// # Endpoint
/// `GET /api/users`
///
/// # Response
/// - **200 OK**: JSON array of users in creation order
/// ```json
/// [
///   {
///     "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
///     "username": "alice",
///     "age": 30,
///     "hobbies": ["chess"]
///   }
/// ]
/// ```
pub async fn list_users(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let users = state.store.list().map_err(map_store_error)?;
    json_response(200, &users)
}

/// Reads a single user.
///
/// # Endpoint
/// `GET /api/users/{id}`
///
/// # Response
/// - **200 OK**: The user record
///
/// # Errors
/// - **400 Bad Request**: `{"error":"Invalid userId"}` if the id is not UUID-shaped
/// - **404 Not Found**: `{"error":"User not found"}`
///
/// # Example
/// ```bash
/// curl http://localhost:4000/api/users/0f8fad5b-d9cb-469f-a165-70867728950e
/// ```
pub async fn get_user(path: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let user_id = parse_user_id(path)?;

    let user = state
        .store
        .get(&user_id)
        .map_err(map_store_error)?
        .ok_or(RouterError::NotFound)?;

    json_response(200, &user)
}

/// Creates a user.
///
/// # Endpoint
/// `POST /api/users`
///
/// # Request Body
/// ```json
/// { "username": "alice", "age": 30, "hobbies": ["chess"] }
/// ```
///
/// # Response
/// - **201 Created**: The stored record including its generated `id`
///
/// # Errors
/// - **400 Bad Request**: `{"error":"Missing required fields"}`
/// - **500 Internal Server Error**: Body is not valid JSON
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:4000/api/users \
///   -H "Content-Type: application/json" \
///   -d '{"username": "alice", "age": 30, "hobbies": ["chess"]}'
/// ```
pub async fn create_user<B>(
    req: Request<B>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let body_bytes = read_request_body(req).await?;
    let new_user = parse_create_request(&body_bytes)?;

    let user = state.store.create(new_user).map_err(map_store_error)?;
    tracing::info!("Created user {}", user.id);

    json_response(201, &user)
}

/// Partially updates a user.
///
/// # Endpoint
/// `PUT /api/users/{id}`
///
/// # Request Body
/// Any subset of the user fields:
/// ```json
/// { "age": 31 }
/// ```
///
/// # Response
/// - **200 OK**: The updated record
///
/// # Errors
/// - **400 Bad Request**: Invalid id (checked before the body is read)
/// - **404 Not Found**: No user with this id
/// - **500 Internal Server Error**: Body is not valid JSON, or a field has the wrong type
///
/// # Notes
/// - Unlike create, fields are not required; an empty object changes nothing
/// - `id` in the body is ignored
pub async fn update_user<B>(
    req: Request<B>,
    path: &str,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let user_id = parse_user_id(path)?;

    let body_bytes = read_request_body(req).await?;
    let patch = parse_update_request(&body_bytes)?;

    let user = state
        .store
        .update(&user_id, patch)
        .map_err(map_store_error)?
        .ok_or(RouterError::NotFound)?;
    tracing::info!("Updated user {}", user.id);

    json_response(200, &user)
}

/// Deletes a user.
///
/// # Endpoint
/// `DELETE /api/users/{id}`
///
/// # Response
/// - **204 No Content**: User removed, empty body
///
/// # Errors
/// - **400 Bad Request**: Invalid id
/// - **404 Not Found**: No user with this id
pub async fn delete_user(path: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let user_id = parse_user_id(path)?;

    let deleted = state.store.delete(&user_id).map_err(map_store_error)?;
    if !deleted {
        return Err(RouterError::NotFound);
    }
    tracing::info!("Deleted user {}", user_id);

    build_empty_response(204)
}
