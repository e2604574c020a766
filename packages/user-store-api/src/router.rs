//! Matchit routing configuration.

use std::fmt::Display;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handlers;
use user_store_core::UserStore;

/// Collection path.
pub const USERS_PATH: &str = "/api/users";

/// Prefix shared by every member path. `/api/users/` itself counts as a
/// member path with an empty id.
pub const USERS_MEMBER_PREFIX: &str = "/api/users/";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// User collection
    pub store: Arc<UserStore>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router serving the given store.
    pub fn new(store: Arc<UserStore>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert(USERS_PATH, RouteHandler::Collection)
            .expect("Failed to insert /api/users route");
        router
            .insert("/api/users/{*rest}", RouteHandler::Member)
            .expect("Failed to insert /api/users/{*rest} route");

        Self {
            inner: router,
            state: AppState { store },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Handler errors are turned into their JSON error responses here, so
    /// this never fails.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: Display,
    {
        let path = req.uri().path().to_string();

        let result = match self.resolve(&path) {
            Some(handler) => handler.handle(req, &path, self.state.clone()).await,
            None => Err(RouterError::RouteNotFound),
        };

        result.unwrap_or_else(|err| {
            if err.status() == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!("Request to {} failed: {}", path, err);
            }
            Response::from(err)
        })
    }

    fn resolve(&self, path: &str) -> Option<RouteHandler> {
        match self.inner.at(path) {
            Ok(matched) => Some(*matched.value),
            Err(_) if path.starts_with(USERS_MEMBER_PREFIX) => Some(RouteHandler::Member),
            Err(_) => None,
        }
    }
}

/// Route handler function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteHandler {
    /// `/api/users`
    Collection,
    /// `/api/users/...`, id is the last path segment
    Member,
}

impl RouteHandler {
    /// Dispatches on method. Unsupported methods are reported as unknown routes.
    async fn handle<B>(
        self,
        req: Request<B>,
        path: &str,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let method = req.method().clone();
        match self {
            RouteHandler::Collection => {
                if method == Method::GET {
                    handlers::list_users(state).await
                } else if method == Method::POST {
                    handlers::create_user(req, state).await
                } else {
                    Err(RouterError::RouteNotFound)
                }
            }
            RouteHandler::Member => {
                if method == Method::GET {
                    handlers::get_user(path, state).await
                } else if method == Method::PUT {
                    handlers::update_user(req, path, state).await
                } else if method == Method::DELETE {
                    handlers::delete_user(path, state).await
                } else {
                    Err(RouterError::RouteNotFound)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    /// Path id is not UUID-shaped
    InvalidIdentifier,
    /// No user with the requested id
    NotFound,
    /// Create body lacks a required field or has one of the wrong type
    ValidationFailed,
    /// Write body could not be parsed or applied
    MalformedPayload(String),
    /// Any other failure while handling the request
    Internal(String),
    /// No route for this method and path
    RouteNotFound,
}

impl RouterError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::InvalidIdentifier | RouterError::ValidationFailed => {
                StatusCode::BAD_REQUEST
            }
            RouterError::NotFound | RouterError::RouteNotFound => StatusCode::NOT_FOUND,
            RouterError::MalformedPayload(_) | RouterError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client. Details of server-side failures stay in logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            RouterError::InvalidIdentifier => "Invalid userId",
            RouterError::NotFound => "User not found",
            RouterError::ValidationFailed => "Missing required fields",
            RouterError::MalformedPayload(_) | RouterError::Internal(_) => "Internal Server Error",
            RouterError::RouteNotFound => "Resource not found",
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::InvalidIdentifier => write!(f, "Invalid userId"),
            RouterError::NotFound => write!(f, "User not found"),
            RouterError::ValidationFailed => write!(f, "Missing required fields"),
            RouterError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
            RouterError::Internal(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::RouteNotFound => write!(f, "Resource not found"),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let error_response = handlers::error_response(err.client_message());
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|_| br#"{"error":"Internal Server Error"}"#.to_vec());

        let mut response = Response::new(Bytes::from(body));
        *response.status_mut() = err.status();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
