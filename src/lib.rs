//! wardrobe-planner: wardrobe cataloguing and outfit planning core
//!
//! This crate provides the logic behind a wardrobe planner: a catalog of
//! clothing items, a slot-based outfit selection, a rule-based suggestion
//! engine, and a compositor that flattens the selected items into a single
//! thumbnail. Rendering, file dialogs and UI chrome live outside; they
//! drive a [`PlannerSession`] through plain calls and observe it through
//! registered change listeners.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wardrobe_planner::{
//!     Category, ClothingItem, ImageData, MemoryStore, PlannerSession, parse_tags,
//! };
//!
//! // Catalogue a couple of garments (image bytes are opaque here).
//! let top = ClothingItem::new(
//!     ImageData::new(vec![0; 16]),
//!     Category::Top,
//!     "Red Plaid",
//!     "Winter",
//!     "Casual",
//!     parse_tags("warm, flannel"),
//! ).unwrap();
//! let bottom = ClothingItem::new(
//!     ImageData::new(vec![0; 16]),
//!     Category::Bottom,
//!     "Red Denim",
//!     "Winter",
//!     "Casual",
//!     vec![],
//! ).unwrap();
//!
//! let mut session = PlannerSession::with_rng(
//!     vec![top, bottom],
//!     StdRng::seed_from_u64(1),
//! );
//!
//! // Ask for a suggestion, then save the look.
//! session.suggest(Some("Casual"));
//! assert!(session.selection().top().is_some());
//!
//! let mut outfits = MemoryStore::new();
//! let saved = session.save_outfit("Friday", "", &mut outfits).unwrap();
//! assert!(saved.thumb.is_some());
//! ```
//!
//! # Export / Import
//!
//! Outfit collections serialize to JSON arrays via [`export_outfits`] and
//! merge back through [`import_outfits`], a non-destructive merge that
//! never overwrites records already in the store.

mod catalog;
mod composite;
mod error;
mod export;
mod item;
mod outfit;
mod selection;
mod session;
mod store;
mod suggest;

pub use catalog::{CatalogFilter, distinct_colors};
pub use composite::{THUMB_HEIGHT, THUMB_WIDTH, composite};
pub use error::Error;
pub use export::{export_file_name, export_outfit, export_outfits, import_outfits};
pub use item::{Category, ClothingItem, ImageData, ItemId, parse_tags};
pub use outfit::{OutfitId, OutfitRecord};
pub use selection::{SelectionState, Slot};
pub use session::{ChangeListener, PlannerSession};
pub use store::{CatalogStore, JsonStore, MemoryStore, OutfitStore};
pub use suggest::{Suggestion, suggest};
