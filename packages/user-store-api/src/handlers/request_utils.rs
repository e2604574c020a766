//! Request utilities for HTTP endpoints.

use std::fmt::Display;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::Serialize;
use serde_json::Value;

use crate::router::RouterError;
use user_store_core::id::is_valid_user_id;
use user_store_core::{NewUser, StoreError, UserPatch};

/// Reads the whole request body.
///
/// There is no timeout: the handler waits as long as the client keeps the
/// body open.
pub async fn read_request_body<B>(req: Request<B>) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| RouterError::Internal(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Takes the final path segment (text after the last `/`) as the user id.
pub fn user_id_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Extracts the user id from the path and checks its format.
pub fn parse_user_id(path: &str) -> Result<String, RouterError> {
    let id = user_id_from_path(path);
    if !is_valid_user_id(id) {
        return Err(RouterError::InvalidIdentifier);
    }
    Ok(id.to_string())
}

/// Map StoreError to RouterError
pub fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::LockPoisoned => RouterError::Internal(format!("Store error: {}", e)),
    }
}

/// Parses and validates a create body.
///
/// Unparseable JSON and a `null` body are payload failures (500). Any other
/// JSON that lacks a non-empty `username` string, a numeric `age`, or a
/// `hobbies` array of strings fails validation (400).
pub fn parse_create_request(body: &[u8]) -> Result<NewUser, RouterError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RouterError::MalformedPayload(format!("Failed to parse request: {}", e)))?;

    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => {
            return Err(RouterError::MalformedPayload(
                "Request body is null".to_string(),
            ))
        }
        _ => return Err(RouterError::ValidationFailed),
    };

    let username = match fields.get("username") {
        Some(Value::String(username)) if !username.is_empty() => username.clone(),
        _ => return Err(RouterError::ValidationFailed),
    };
    let age = match fields.get("age") {
        Some(Value::Number(age)) => age.clone(),
        _ => return Err(RouterError::ValidationFailed),
    };
    let hobbies = match fields.get("hobbies") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
            .ok_or(RouterError::ValidationFailed)?,
        _ => return Err(RouterError::ValidationFailed),
    };

    Ok(NewUser {
        username,
        age,
        hobbies,
    })
}

/// Parses an update body into a patch.
///
/// Only JSON objects carry fields to merge; `null` and other JSON values
/// merge nothing. Known fields are not checked for presence, but a value of
/// the wrong JSON type cannot be stored and is a payload failure.
pub fn parse_update_request(body: &[u8]) -> Result<UserPatch, RouterError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RouterError::MalformedPayload(format!("Failed to parse request: {}", e)))?;

    if !value.is_object() {
        return Ok(UserPatch::default());
    }
    serde_json::from_value(value)
        .map_err(|e| RouterError::MalformedPayload(format!("Failed to apply update: {}", e)))
}

/// Serializes `data` and builds a JSON response.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::Internal(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::Internal(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::Internal(format!("Failed to build response: {}", e)))
}
