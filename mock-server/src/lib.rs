//! In-memory stand-in for the todo backend: email/password auth plus a
//! per-user todo collection. Used by integration tests and for local
//! development of hosts.
//!
//! DTOs here are defined independently of the core crate on purpose;
//! the core's integration tests catch schema drift between the two.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

#[derive(Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Debug, Clone)]
struct User {
    id: u64,
    password: String,
}

/// A todo plus the id of the user who owns it.
#[derive(Debug, Clone)]
struct OwnedTodo {
    owner: u64,
    todo: Todo,
}

#[derive(Default)]
pub struct AppState {
    users: RwLock<HashMap<String, User>>,
    tokens: RwLock<HashMap<String, u64>>,
    todos: RwLock<HashMap<u64, OwnedTodo>>,
    next_user_id: AtomicU64,
    next_todo_id: AtomicU64,
}

pub type Db = Arc<AppState>;

pub fn app() -> Router {
    let db: Db = Arc::new(AppState::default());
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/api/v1/todo", get(list_todos).put(update_todo))
        .route("/api/v1/todo/create", post(create_todo))
        .route("/api/v1/todo/{id}", axum::routing::delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn rejection(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorMessage {
            message: message.to_string(),
        }),
    )
        .into_response()
}

async fn register(State(db): State<Db>, Json(input): Json<Credentials>) -> Response {
    let mut users = db.users.write().await;
    if users.contains_key(&input.email) {
        return rejection(StatusCode::CONFLICT, "Email already registered");
    }
    let id = db.next_user_id.fetch_add(1, Ordering::Relaxed) + 1;
    users.insert(
        input.email.clone(),
        User {
            id,
            password: input.password,
        },
    );
    info!(email = %input.email, "registered user");
    StatusCode::OK.into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Response {
    let users = db.users.read().await;
    let user = match users.get(&input.email) {
        Some(user) if user.password == input.password => user.clone(),
        _ => return rejection(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    };
    drop(users);

    let token = Uuid::new_v4().to_string();
    db.tokens.write().await.insert(token.clone(), user.id);
    info!(email = %input.email, "issued session token");
    Json(TokenResponse { token }).into_response()
}

/// Resolve the bearer token from `Authorization` to a user id.
async fn authenticate(db: &Db, headers: &HeaderMap) -> Result<u64, StatusCode> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;
    db.tokens
        .read()
        .await
        .get(token)
        .copied()
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn list_todos(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Todo>>, StatusCode> {
    let user = authenticate(&db, &headers).await?;
    let todos = db.todos.read().await;
    let mut owned: Vec<Todo> = todos
        .values()
        .filter(|t| t.owner == user)
        .map(|t| t.todo.clone())
        .collect();
    owned.sort_by_key(|t| t.id);
    Ok(Json(owned))
}

async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let user = authenticate(&db, &headers).await?;
    let id = db.next_todo_id.fetch_add(1, Ordering::Relaxed) + 1;
    let todo = Todo {
        id,
        title: input.title,
        description: input.description,
        is_completed: input.is_completed,
    };
    db.todos.write().await.insert(
        id,
        OwnedTodo {
            owner: user,
            todo: todo.clone(),
        },
    );
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Todo>,
) -> Result<String, StatusCode> {
    let user = authenticate(&db, &headers).await?;
    let mut todos = db.todos.write().await;
    match todos.get_mut(&input.id) {
        Some(entry) if entry.owner == user => {
            entry.todo = input;
            Ok("Todo updated successfully".to_string())
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<String, StatusCode> {
    let user = authenticate(&db, &headers).await?;
    let mut todos = db.todos.write().await;
    match todos.get(&id) {
        Some(entry) if entry.owner == user => {
            todos.remove(&id);
            Ok("Todo deleted successfully".to_string())
        }
        _ => Err(StatusCode::NOT_FOUND),
    }
}
