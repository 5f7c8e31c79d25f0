//! File-backed session token, standing in for the browser's local
//! storage: written at login, read at startup, never cleared here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use todo_sync::Session;

const TOKEN_FILE_ENV: &str = "TODO_SYNC_TOKEN_FILE";

/// Default token location, overridable via `TODO_SYNC_TOKEN_FILE`. Falls
/// back to the working directory in environments without a home.
pub fn token_path() -> PathBuf {
    if let Some(path) = std::env::var_os(TOKEN_FILE_ENV) {
        return PathBuf::from(path);
    }
    let base = dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".todo-sync").join("token")
}

/// Read the stored session, if any. A missing or empty file is "not
/// logged in", not an error.
pub fn load_from(path: &Path) -> Result<Option<Session>> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let token = raw.trim();
            if token.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Session::new(token)))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("could not read token file {}", path.display()))
        }
    }
}

pub fn save_to(path: &Path, token: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }
    fs::write(path, token)
        .with_context(|| format!("could not write token file {}", path.display()))
}

pub fn load() -> Result<Option<Session>> {
    load_from(&token_path())
}

pub fn save(token: &str) -> Result<PathBuf> {
    let path = token_path();
    save_to(&path, token)?;
    Ok(path)
}
