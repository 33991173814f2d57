//! Persistent chat identity.
//!
//! The web widget stored a random `user_...` token in localStorage under a
//! fixed key and reused it forever. Here the equivalent is a single file at
//! `~/.gozcu/user_id` with no expiry.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

/// Returns `~/.gozcu/user_id`.
fn user_id_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gozcu").join("user_id"))
}

/// Generates a fresh `user_` token: nine hex characters of a v4 UUID.
fn generate_user_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("user_{}", &uuid[..9])
}

/// Loads the persisted user id, generating and persisting one on first run.
///
/// If the home directory or the file is unusable the id is still generated —
/// it just won't survive the session, which only costs chat continuity.
pub fn load_or_create_user_id() -> String {
    let Some(path) = user_id_path() else {
        warn!("Could not determine home directory, using ephemeral user id");
        return generate_user_id();
    };

    if let Ok(existing) = fs::read_to_string(&path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            debug!("Loaded user id from {}", path.display());
            return trimmed.to_string();
        }
    }

    let id = generate_user_id();
    if let Err(e) = persist(&path, &id) {
        warn!("Failed to persist user id: {}", e);
    }
    id
}

fn persist(path: &PathBuf, id: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, id)
}
