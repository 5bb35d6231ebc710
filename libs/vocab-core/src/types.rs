//! Core record types for the vocabulary application.

use serde::{Deserialize, Serialize};

/// Categories that exist in the dataset but are not yet available to
/// learners. Cards in these categories render greyed out and must not be
/// activatable.
pub const LOCKED_CATEGORIES: [&str; 2] = ["intermediate", "advanced"];

/// Field accessors a list view needs from a record type.
///
/// Implemented by both record kinds so a single `ListView` serves the card
/// browser and the table browser.
pub trait ViewRecord {
    /// Display label, also the target of the substring search.
    fn name(&self) -> &str;

    /// Category used by the category filter; `None` for record types
    /// without one.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Whether activation of this record must be prevented.
    fn is_locked(&self) -> bool {
        false
    }
}

/// Prompt/answer labels the matching game shows on its two columns.
pub trait PairRecord {
    fn prompt(&self) -> &str;
    fn answer(&self) -> &str;
}

/// One card in the vocabulary card browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    pub image_path: String,
    pub category: String,
}

impl ViewRecord for CardRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn is_locked(&self) -> bool {
        LOCKED_CATEGORIES.contains(&self.category.as_str())
    }
}

/// One row in the letter/sound table, also the source of game pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub letter: String,
    pub sound: String,
    pub pronunciation: String,
}

impl ViewRecord for EntryRecord {
    fn name(&self) -> &str {
        &self.letter
    }
}

impl PairRecord for EntryRecord {
    fn prompt(&self) -> &str {
        &self.letter
    }

    fn answer(&self) -> &str {
        &self.sound
    }
}
