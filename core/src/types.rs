//! Domain DTOs for the todo service.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined
//! independently of the mock-server crate; integration tests catch schema
//! drift. The wire format uses camelCase for the completion flag
//! (`isCompleted`) and numeric server-assigned ids, so Rust fields carry
//! serde renames rather than bending the field names.

use serde::{Deserialize, Serialize};

/// A single todo item as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

/// Creation payload. The server assigns the id; the description defaults
/// to the title because the backend requires one and the front end only
/// collects a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl NewTodo {
    /// Build a creation payload from a bare title, applying the
    /// description-defaults-to-title rule.
    pub fn from_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: title.to_string(),
            is_completed: false,
        }
    }
}

/// Email/password pair sent to both auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error envelope the auth endpoints use for rejections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_camel_case_completion_key() {
        let todo = Todo {
            id: 7,
            title: "Buy milk".to_string(),
            description: "Buy milk".to_string(),
            is_completed: true,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["isCompleted"], true);
        assert!(json.get("is_completed").is_none());
    }

    #[test]
    fn todo_roundtrips_through_json() {
        let raw = r#"{"id":3,"title":"Walk dog","description":"around the block","isCompleted":false}"#;
        let todo: Todo = serde_json::from_str(raw).unwrap();
        assert_eq!(todo.id, 3);
        assert_eq!(todo.description, "around the block");
        assert!(!todo.is_completed);
        let back = serde_json::to_string(&todo).unwrap();
        let again: Todo = serde_json::from_str(&back).unwrap();
        assert_eq!(again, todo);
    }

    #[test]
    fn new_todo_defaults_description_to_title() {
        let input = NewTodo::from_title("Buy milk");
        assert_eq!(input.description, "Buy milk");
        assert!(!input.is_completed);
    }

    #[test]
    fn new_todo_completed_defaults_to_false_on_the_wire() {
        let input: NewTodo =
            serde_json::from_str(r#"{"title":"No flag","description":"No flag"}"#).unwrap();
        assert!(!input.is_completed);
    }
}
