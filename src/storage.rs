//! Roster persistence in the browser's `localStorage`.
//!
//! Each side is stored as a JSON array of `{ name, weight }` objects under its
//! own key. Loading never fails outright: missing or corrupt data yields an
//! empty roster of the configured capacity, so the page always renders.

use crate::config::{STORAGE_KEY_LEFT, STORAGE_KEY_RIGHT};
use dragon_boat_scale::{Roster, Side};
use log::{info, warn};
use std::fmt;

#[derive(Debug)]
pub enum StorageError {
    Unavailable,
    Access(String),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "localStorage is not available"),
            StorageError::Access(msg) => write!(f, "localStorage access failed: {}", msg),
            StorageError::Json(e) => write!(f, "Saved roster is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

pub fn storage_key(side: Side) -> &'static str {
    match side {
        Side::Left => STORAGE_KEY_LEFT,
        Side::Right => STORAGE_KEY_RIGHT,
    }
}

pub fn encode_roster(roster: &Roster) -> Result<String, StorageError> {
    Ok(serde_json::to_string(roster)?)
}

/// Decode a saved roster, fitting it to `capacity` seats.
pub fn decode_roster(raw: &str, capacity: usize) -> Result<Roster, StorageError> {
    let roster: Roster = serde_json::from_str(raw)?;
    Ok(roster.resized(capacity))
}

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    gloo_utils::window()
        .local_storage()
        .map_err(|e| StorageError::Access(format!("{:?}", e)))?
        .ok_or(StorageError::Unavailable)
}

fn read_raw(side: Side) -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(storage_key(side))
        .map_err(|e| StorageError::Access(format!("{:?}", e)))
}

/// Load one side, falling back to an empty roster.
pub fn load_roster(side: Side, capacity: usize) -> Roster {
    let raw = match read_raw(side) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Roster::new(capacity),
        Err(e) => {
            warn!("Could not read {} side: {}", side, e);
            return Roster::new(capacity);
        }
    };
    match decode_roster(&raw, capacity) {
        Ok(roster) => {
            info!(
                "Restored {} side with {} rowers",
                side,
                roster.occupied_count()
            );
            roster
        }
        Err(e) => {
            warn!("Discarding saved {} side: {}", side, e);
            Roster::new(capacity)
        }
    }
}

pub fn save_roster(side: Side, roster: &Roster) -> Result<(), StorageError> {
    let raw = encode_roster(roster)?;
    local_storage()?
        .set_item(storage_key(side), &raw)
        .map_err(|e| StorageError::Access(format!("{:?}", e)))
}
