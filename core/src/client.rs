//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `ApiClient` holds a `base_url` and an optional `Session`; it carries no
//! other state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP
//! round trip, keeping the core deterministic and free of I/O
//! dependencies. Success is judged the way the original front end judged
//! `Response.ok`: any 2xx passes, with 401 and 404 mapped to dedicated
//! error variants.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::types::{Credentials, ErrorMessage, NewTodo, Todo, TokenResponse};

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Authenticated builders fail with
/// [`ApiError::MissingToken`] when the client has no session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// An unauthenticated client, sufficient for login and register.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// A client authorized by `session` for collection operations.
    pub fn with_session(base_url: &str, session: Session) -> Self {
        Self {
            session: Some(session),
            ..Self::new(base_url)
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Install (or replace) the session, e.g. right after a login.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.session
            .as_ref()
            .map(Session::token)
            .ok_or(ApiError::MissingToken)
    }

    // --- auth ---

    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/auth/login", self.base_url),
            body,
        ))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<TokenResponse, ApiError> {
        if !response.is_ok() {
            return Err(ApiError::AuthRejected(auth_message(
                &response.body,
                "Login failed",
            )));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_register(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/auth/register", self.base_url),
            body,
        ))
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<(), ApiError> {
        if !response.is_ok() {
            return Err(ApiError::AuthRejected(auth_message(
                &response.body,
                "Register failed",
            )));
        }
        Ok(())
    }

    // --- collection ---

    pub fn build_list_todos(&self) -> Result<HttpRequest, ApiError> {
        let token = self.bearer()?;
        Ok(
            HttpRequest::bare(HttpMethod::Get, format!("{}/api/v1/todo", self.base_url))
                .with_bearer(token),
        )
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_ok(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Trims `title` and builds the creation request. An empty trimmed
    /// title is a validation error; no request is built and nothing goes
    /// over the wire.
    pub fn build_create_todo(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let token = self.bearer()?;
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::EmptyTitle);
        }
        let body = serde_json::to_string(&NewTodo::from_title(title))
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/api/v1/todo/create", self.base_url),
            body,
        )
        .with_bearer(token))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_ok(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// PUTs the full todo, completion flag included. The server replaces
    /// the stored record wholesale.
    pub fn build_update_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let token = self.bearer()?;
        let body =
            serde_json::to_string(todo).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            format!("{}/api/v1/todo", self.base_url),
            body,
        )
        .with_bearer(token))
    }

    /// The update endpoint acknowledges with plain text, not JSON.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_ok(&response)?;
        Ok(response.body)
    }

    pub fn build_delete_todo(&self, id: u64) -> Result<HttpRequest, ApiError> {
        let token = self.bearer()?;
        Ok(HttpRequest::bare(
            HttpMethod::Delete,
            format!("{}/api/v1/todo/{id}", self.base_url),
        )
        .with_bearer(token))
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_ok(&response)?;
        Ok(response.body)
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_ok(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_ok() {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Pull the server's `message` out of an auth-failure body, falling back
/// to a generic message when the body is not the expected envelope.
fn auth_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorMessage>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| fallback.to_string())
}
