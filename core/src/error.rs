//! Error types for the todo sync client.
//!
//! # Design
//! Every failure mode the front end distinguishes gets its own variant:
//! a missing session and an empty title are caught before any request is
//! built, 401 and 404 get dedicated variants because callers route them
//! differently (back to login vs. gone-from-collection), and everything
//! else lands in `Http` with the raw status and body for diagnostics.
//! Failures are terminal for the triggering operation; nothing retries.

use std::fmt;

/// Errors returned by `ApiClient` and `SyncClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// No session token is available; the caller must log in first.
    MissingToken,

    /// The todo title was empty after trimming; no request was sent.
    EmptyTitle,

    /// The server rejected the bearer token (401).
    Unauthorized,

    /// The server returned 404 — the requested todo does not exist.
    NotFound,

    /// The server rejected a login or registration attempt. Carries the
    /// server's `message` field when one was present.
    AuthRejected(String),

    /// The server returned a non-2xx status not covered above.
    Http { status: u16, body: String },

    /// The host's transport failed before a response was obtained.
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "Please login first"),
            ApiError::EmptyTitle => write!(f, "Please enter a todo item"),
            ApiError::Unauthorized => write!(f, "session rejected, please login again"),
            ApiError::NotFound => write!(f, "todo not found"),
            ApiError::AuthRejected(msg) => write!(f, "{msg}"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
