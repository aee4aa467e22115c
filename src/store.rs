//! Persistence boundary: catalog and outfit stores.
//!
//! The planner core only assumes the contracts below: synchronous reads
//! that reflect the latest writes, newest-first ordering on insert.
//! [`MemoryStore`] backs tests and ephemeral sessions; [`JsonStore`] keeps
//! both collections as JSON files in a directory, the durable analog of
//! the original per-profile storage.
//!
//! Reads never fail: an unreadable or corrupt backing file degrades to an
//! empty list (with a warning) so the planner stays usable.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::Error;
use crate::item::{ClothingItem, ItemId};
use crate::outfit::{OutfitId, OutfitRecord};

// ============================================================================
// Store Traits
// ============================================================================

/// Storage contract for the clothing catalog.
pub trait CatalogStore {
    /// Every catalogued item, newest first.
    fn list(&self) -> Vec<ClothingItem>;

    /// Prepends a new item.
    fn add(&mut self, item: ClothingItem) -> Result<(), Error>;

    /// Replaces the stored item with the same id. Unknown ids are a no-op.
    fn update(&mut self, item: ClothingItem) -> Result<(), Error>;

    /// Removes the item with the given id, if present.
    fn delete(&mut self, id: &ItemId) -> Result<(), Error>;
}

/// Storage contract for saved outfits.
pub trait OutfitStore {
    /// Every saved outfit, newest first.
    fn list(&self) -> Vec<OutfitRecord>;

    /// Prepends a new record.
    fn save(&mut self, record: OutfitRecord) -> Result<(), Error>;

    /// Removes the record with the given id, if present.
    fn delete(&mut self, id: &OutfitId) -> Result<(), Error>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store implementing both contracts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clothes: Vec<ClothingItem>,
    outfits: Vec<OutfitRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryStore {
    fn list(&self) -> Vec<ClothingItem> {
        self.clothes.clone()
    }

    fn add(&mut self, item: ClothingItem) -> Result<(), Error> {
        self.clothes.insert(0, item);
        Ok(())
    }

    fn update(&mut self, item: ClothingItem) -> Result<(), Error> {
        if let Some(existing) = self.clothes.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        }
        Ok(())
    }

    fn delete(&mut self, id: &ItemId) -> Result<(), Error> {
        self.clothes.retain(|item| item.id != *id);
        Ok(())
    }
}

impl OutfitStore for MemoryStore {
    fn list(&self) -> Vec<OutfitRecord> {
        self.outfits.clone()
    }

    fn save(&mut self, record: OutfitRecord) -> Result<(), Error> {
        self.outfits.insert(0, record);
        Ok(())
    }

    fn delete(&mut self, id: &OutfitId) -> Result<(), Error> {
        self.outfits.retain(|record| record.id != *id);
        Ok(())
    }
}

// ============================================================================
// JsonStore
// ============================================================================

const CLOTHES_FILE: &str = "clothes.json";
const OUTFITS_FILE: &str = "outfits.json";

/// File-backed store: one directory holding `clothes.json` and
/// `outfits.json`, each a JSON array. Every write persists the whole
/// collection, mirroring the original storage semantics.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(error = %err, path = %path.display(), "treating unreadable store as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "treating corrupt store as empty");
                Vec::new()
            }
        }
    }

    fn persist<T: Serialize>(&self, file: &str, list: &[T]) -> Result<(), Error> {
        let json = serde_json::to_string(list)?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }
}

impl CatalogStore for JsonStore {
    fn list(&self) -> Vec<ClothingItem> {
        self.load(CLOTHES_FILE)
    }

    fn add(&mut self, item: ClothingItem) -> Result<(), Error> {
        let mut list = CatalogStore::list(self);
        list.insert(0, item);
        self.persist(CLOTHES_FILE, &list)
    }

    fn update(&mut self, item: ClothingItem) -> Result<(), Error> {
        let mut list = CatalogStore::list(self);
        if let Some(existing) = list.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        }
        self.persist(CLOTHES_FILE, &list)
    }

    fn delete(&mut self, id: &ItemId) -> Result<(), Error> {
        let mut list = CatalogStore::list(self);
        list.retain(|item| item.id != *id);
        self.persist(CLOTHES_FILE, &list)
    }
}

impl OutfitStore for JsonStore {
    fn list(&self) -> Vec<OutfitRecord> {
        self.load(OUTFITS_FILE)
    }

    fn save(&mut self, record: OutfitRecord) -> Result<(), Error> {
        let mut list = OutfitStore::list(self);
        list.insert(0, record);
        self.persist(OUTFITS_FILE, &list)
    }

    fn delete(&mut self, id: &OutfitId) -> Result<(), Error> {
        let mut list = OutfitStore::list(self);
        list.retain(|record| record.id != *id);
        self.persist(OUTFITS_FILE, &list)
    }
}

// ============================================================================
// Tests
// ============================================================================
