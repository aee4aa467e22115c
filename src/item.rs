//! Clothing item types: the catalogued garment and its metadata.
//!
//! A [`ClothingItem`] is created once by the catalog-entry flow and never
//! mutated afterwards; edits are full replacements through the store. The
//! item's [`Category`] decides which planning slot it can occupy, and its
//! free-text `color` contributes a coarse "color family" (the first
//! whitespace token, lowercased) used by the suggestion engine.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::Error;

// ============================================================================
// ItemId
// ============================================================================

/// Opaque unique identifier of a catalogued item.
///
/// Generated once at creation; outfit records reference items by this id
/// without owning them, so a stale id simply fails to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

// ============================================================================
// ImageData
// ============================================================================

/// Encoded raster image bytes (PNG/JPEG family).
///
/// The planner treats the encoding as opaque: bytes go into the `image`
/// decoder when compositing and are otherwise just carried around. On the
/// JSON wire the bytes travel as a base64 string.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData(Vec<u8>);

impl ImageData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageData({} bytes)", self.0.len())
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.as_bytes())
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Category
// ============================================================================

/// Garment category, deciding the planning slot an item can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessory,
}

impl Category {
    /// Parses a category label, case-insensitively.
    ///
    /// Anything that is not a recognized label maps to [`Category::Accessory`],
    /// so legacy or hand-edited data still lands in a slot.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "shoes" => Self::Shoes,
            _ => Self::Accessory,
        }
    }

    /// The canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Shoes => "Shoes",
            Self::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

// ============================================================================
// ClothingItem
// ============================================================================

/// A catalogued garment.
///
/// # JSON Format
///
/// ```json
/// {
///   "id": "5b2c…",
///   "img": "<base64>",
///   "category": "Top",
///   "color": "Red Plaid",
///   "season": "Winter",
///   "occasion": "Casual",
///   "tags": ["warm", "flannel"],
///   "createdAt": 1754500000000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: ItemId,

    /// Encoded image of the garment, stored inline.
    #[serde(rename = "img")]
    pub image: ImageData,

    pub category: Category,

    /// Free-text color label. The first whitespace token is the item's
    /// coarse color family.
    pub color: String,

    pub season: String,

    pub occasion: String,

    pub tags: Vec<String>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Creates a new catalog item, validating the catalog-entry preconditions.
    ///
    /// Fails with [`Error::Validation`] when the image is empty or any of
    /// color/season/occasion is blank.
    pub fn new(
        image: ImageData,
        category: Category,
        color: impl Into<String>,
        season: impl Into<String>,
        occasion: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self, Error> {
        let (color, season, occasion) = (color.into(), season.into(), occasion.into());

        if image.is_empty() {
            return Err(Error::validation("upload an image first"));
        }
        if color.trim().is_empty() || season.trim().is_empty() || occasion.trim().is_empty() {
            return Err(Error::validation("fill all fields"));
        }

        Ok(Self {
            id: ItemId::generate(),
            image,
            category,
            color,
            season,
            occasion,
            tags,
            created_at: Utc::now(),
        })
    }

    /// The coarse color family: first whitespace token of `color`, lowercased.
    ///
    /// `None` when the color label is blank.
    pub fn color_family(&self) -> Option<String> {
        self.color
            .split_whitespace()
            .next()
            .map(|token| token.to_lowercase())
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
