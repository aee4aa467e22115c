//! Saved outfit records.
//!
//! An [`OutfitRecord`] is the frozen snapshot produced when a planning
//! selection is saved: item references by id, display metadata, and the
//! composite thumbnail rendered at save time. References are weak:
//! deleting a catalog item leaves referencing records intact, and lookups
//! against the missing id simply resolve to nothing.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{ImageData, ItemId};

// ============================================================================
// OutfitId
// ============================================================================

/// Opaque unique identifier of a saved outfit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(String);

impl OutfitId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutfitId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for OutfitId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

// ============================================================================
// OutfitRecord
// ============================================================================

/// A saved outfit.
///
/// The `thumb` is rendered once when the outfit is saved and never
/// recomputed, so the record stays viewable even after referenced items
/// are deleted from the catalog.
///
/// # JSON Format
///
/// ```json
/// {
///   "id": "91ce…",
///   "name": "Friday night",
///   "topId": "5b2c…",
///   "bottomId": null,
///   "shoesId": "a001…",
///   "accessoryId": null,
///   "occasion": "Party",
///   "thumb": "<base64>",
///   "createdAt": 1754500000000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecord {
    pub id: OutfitId,

    /// User label; defaults to a placeholder when saved blank.
    pub name: String,

    pub top_id: Option<ItemId>,
    pub bottom_id: Option<ItemId>,
    pub shoes_id: Option<ItemId>,
    pub accessory_id: Option<ItemId>,

    /// Free-text occasion label, possibly empty.
    pub occasion: String,

    /// Composite preview rendered at save time. Frozen thereafter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<ImageData>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl OutfitRecord {
    /// Case-insensitive substring match over name and occasion, used by
    /// the saved-outfit search box. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.occasion.to_lowercase().contains(&query)
    }
}

// ============================================================================
// Tests
// ============================================================================
