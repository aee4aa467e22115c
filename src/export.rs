//! Outfit collection export and import.
//!
//! Collections travel as plain JSON arrays of records. Import is a
//! non-destructive merge: records whose id already exists in the
//! destination store are skipped untouched, new ones land as a block at
//! the front of the list in payload order. Elements missing optional
//! fields are filled with schema defaults rather than rejected; a payload
//! that is not a JSON array aborts the import entirely.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::item::{ImageData, ItemId};
use crate::outfit::{OutfitId, OutfitRecord};
use crate::store::OutfitStore;

/// Placeholder name for imported records that arrived without one.
const IMPORTED_NAME: &str = "Imported Outfit";

// ============================================================================
// Export
// ============================================================================

/// Serializes a whole collection as a pretty-printed JSON array.
pub fn export_outfits(records: &[OutfitRecord]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Serializes a single record as pretty-printed JSON.
pub fn export_outfit(record: &OutfitRecord) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Download file name for an exported outfit: whitespace runs collapse to
/// underscores, blank names fall back to `outfit`.
pub fn export_file_name(name: &str) -> String {
    let base = name.split_whitespace().collect::<Vec<_>>().join("_");
    if base.is_empty() {
        "outfit.json".to_owned()
    } else {
        format!("{base}.json")
    }
}

// ============================================================================
// Import
// ============================================================================

/// A record as it may arrive in an import payload: everything optional,
/// defaults filled in [`into_record`](Self::into_record).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImportedOutfit {
    id: Option<OutfitId>,
    name: Option<String>,
    top_id: Option<ItemId>,
    bottom_id: Option<ItemId>,
    shoes_id: Option<ItemId>,
    accessory_id: Option<ItemId>,
    occasion: Option<String>,
    thumb: Option<ImageData>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    created_at: Option<DateTime<Utc>>,
}

impl ImportedOutfit {
    fn into_record(self) -> OutfitRecord {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => IMPORTED_NAME.to_owned(),
        };
        OutfitRecord {
            id: self.id.unwrap_or_else(OutfitId::generate),
            name,
            top_id: self.top_id,
            bottom_id: self.bottom_id,
            shoes_id: self.shoes_id,
            accessory_id: self.accessory_id,
            occasion: self.occasion.unwrap_or_default(),
            thumb: self.thumb,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Merges a JSON array of outfit records into `store`.
///
/// Returns the number of records actually added. Existing records are
/// never overwritten: an incoming id that is already stored is dropped
/// silently. Fails with [`Error::Parse`] when the payload is not a JSON
/// array of records, in which case nothing is merged.
pub fn import_outfits(payload: &str, store: &mut dyn OutfitStore) -> Result<usize, Error> {
    let incoming: Vec<ImportedOutfit> = serde_json::from_str(payload)?;

    let existing: HashSet<OutfitId> = store.list().into_iter().map(|record| record.id).collect();
    let to_add: Vec<OutfitRecord> = incoming
        .into_iter()
        .map(ImportedOutfit::into_record)
        .filter(|record| !existing.contains(&record.id))
        .collect();

    let count = to_add.len();
    // save() prepends, so reversed insertion keeps the payload order as a
    // block at the front of the list.
    for record in to_add.into_iter().rev() {
        store.save(record)?;
    }

    debug!(count, "imported outfits");
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::DateTime;

    fn record(id: &str, name: &str) -> OutfitRecord {
        OutfitRecord {
            id: OutfitId::from(id),
            name: name.into(),
            top_id: Some(ItemId::from("top-1")),
            bottom_id: None,
            shoes_id: None,
            accessory_id: None,
            occasion: "Casual".into(),
            thumb: None,
            created_at: DateTime::from_timestamp_millis(1_754_500_000_000).unwrap(),
        }
    }

    #[test]
    fn export_import_round_trip() {
        let records = vec![record("a", "First"), record("b", "Second")];
        let payload = export_outfits(&records).unwrap();

        let mut store = MemoryStore::new();
        let count = import_outfits(&payload, &mut store).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.list(), records);
    }

    #[test]
    fn import_skips_existing_ids_untouched() {
        let mut store = MemoryStore::new();
        let original = record("a", "Original");
        store.save(original.clone()).unwrap();

        // Same id, different content: must not overwrite.
        let payload = export_outfits(&[record("a", "Impostor"), record("b", "New")]).unwrap();
        let count = import_outfits(&payload, &mut store).unwrap();

        assert_eq!(count, 1);
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        let kept = listed.iter().find(|o| o.id == original.id).unwrap();
        assert_eq!(kept, &original);
    }

    #[test]
    fn imported_block_preserves_payload_order() {
        let mut store = MemoryStore::new();
        store.save(record("old", "Old")).unwrap();

        let payload = export_outfits(&[record("x", "X"), record("y", "Y")]).unwrap();
        import_outfits(&payload, &mut store).unwrap();

        let listed = store.list();
        let names: Vec<&str> = listed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y", "Old"]);
    }

    #[test]
    fn import_fills_schema_defaults() {
        let mut store = MemoryStore::new();
        let payload = r#"[{}, {"name": "", "occasion": "Party"}]"#;

        let count = import_outfits(payload, &mut store).unwrap();
        assert_eq!(count, 2);

        let listed = store.list();
        assert_eq!(listed[0].name, "Imported Outfit");
        assert!(listed[0].top_id.is_none());
        assert!(listed[0].thumb.is_none());
        assert_eq!(listed[1].occasion, "Party");
        // Generated ids are distinct.
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[test]
    fn import_rejects_non_array_payload() {
        let mut store = MemoryStore::new();
        store.save(record("a", "Existing")).unwrap();

        let err = import_outfits(r#"{"name": "not a list"}"#, &mut store).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        let err = import_outfits("definitely not json", &mut store).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        // Nothing was merged.
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn file_name_sanitizes_whitespace() {
        assert_eq!(export_file_name("Friday Night  Fit"), "Friday_Night_Fit.json");
        assert_eq!(export_file_name(""), "outfit.json");
        assert_eq!(export_file_name("   "), "outfit.json");
    }
}
