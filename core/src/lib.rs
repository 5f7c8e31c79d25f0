//! Client-side synchronization core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a pure
//! `ListView` rendering of the remote collection in step through the four
//! sync operations: load, create, update, delete. Authentication (login,
//! register) uses the same build/parse split.
//!
//! # Design
//! - `ApiClient` holds `base_url` plus an explicit `Session`; nothing is
//!   read from global state.
//! - `SyncClient` drives whole operations over a `Transport` trait and
//!   reports outcomes as `Notice` values instead of alerting a UI.
//! - The view is fully rebuilt on every successful load; no local edit
//!   survives a resynchronization.
//! - DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod sync;
pub mod types;
pub mod view;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use sync::{Notice, SyncClient, Transport};
pub use types::{Credentials, NewTodo, Todo, TokenResponse};
pub use view::{ListView, TodoCard};
