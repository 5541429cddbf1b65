//! Gratitude entries and the seed inventory derived from them.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::garden::Plant;

/// Length of the text preview shown for a seed.
pub const PREVIEW_CHARS: usize = 50;

/// A single gratitude note. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry from user input.
    ///
    /// The text is trimmed; blank input is rejected.
    pub fn new(text: &str, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyEntry);
        }
        Ok(Self {
            id: format!("entry-{}", Uuid::new_v4()),
            text: text.to_string(),
            created_at: now,
        })
    }

    /// Short preview of the text, ellipsised past [`PREVIEW_CHARS`].
    pub fn preview(&self) -> String {
        if self.text.chars().count() > PREVIEW_CHARS {
            let head: String = self.text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.text.clone()
        }
    }
}

/// Entries that have not been planted yet, in recording order.
pub fn unplanted_seeds<'a>(entries: &'a [Entry], plants: &[Plant]) -> Vec<&'a Entry> {
    let planted: HashSet<&str> = plants.iter().map(|p| p.entry_id.as_str()).collect();
    entries
        .iter()
        .filter(|e| !planted.contains(e.id.as_str()))
        .collect()
}
