//! Bearer-session value for authenticated requests.
//!
//! The original front end read the token from persistent storage into a
//! global at script load. Here the session is an explicit value handed to
//! `ApiClient::with_session`; whoever hosts the client decides where the
//! token lives (a file for the CLI, memory for tests) and when to re-read
//! it.

/// An opaque bearer token authorizing collection operations for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl From<crate::types::TokenResponse> for Session {
    fn from(resp: crate::types::TokenResponse) -> Self {
        Session::new(resp.token)
    }
}
