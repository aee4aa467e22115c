//! Planning-session selection state.
//!
//! [`SelectionState`] holds at most one chosen item per slot. Selection is
//! toggle-based: picking an already-selected item clears its slot, picking
//! anything else replaces whatever the slot held. The state is transient;
//! only its resolved snapshot ([`SelectionState::to_outfit_record`]) is
//! ever persisted.

use crate::error::Error;
use crate::item::{Category, ClothingItem, ImageData, ItemId};
use crate::outfit::{OutfitId, OutfitRecord};

use chrono::Utc;

// ============================================================================
// Slot
// ============================================================================

/// One of the four outfit slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Top,
    Bottom,
    Shoes,
    Accessory,
}

impl Slot {
    /// All slots in preview order: top, bottom, shoes, accessory.
    pub const ALL: [Slot; 4] = [Slot::Top, Slot::Bottom, Slot::Shoes, Slot::Accessory];

    /// Maps a garment category to the slot it occupies.
    ///
    /// Top/Bottom/Shoes map to their own slot; everything else shares the
    /// accessory slot.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Top => Slot::Top,
            Category::Bottom => Slot::Bottom,
            Category::Shoes => Slot::Shoes,
            Category::Accessory => Slot::Accessory,
        }
    }
}

// ============================================================================
// SelectionState
// ============================================================================

/// The current outfit selection, one optional item per slot.
///
/// Invariant: a slot only ever holds an item whose category maps to it
/// (see [`Slot::for_category`]). All mutation goes through
/// [`toggle_select`](Self::toggle_select) and the record loaders, which
/// preserve this.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    top: Option<ClothingItem>,
    bottom: Option<ClothingItem>,
    shoes: Option<ClothingItem>,
    accessory: Option<ClothingItem>,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The item currently occupying `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<&ClothingItem> {
        match slot {
            Slot::Top => self.top.as_ref(),
            Slot::Bottom => self.bottom.as_ref(),
            Slot::Shoes => self.shoes.as_ref(),
            Slot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn top(&self) -> Option<&ClothingItem> {
        self.top.as_ref()
    }

    pub fn bottom(&self) -> Option<&ClothingItem> {
        self.bottom.as_ref()
    }

    pub fn shoes(&self) -> Option<&ClothingItem> {
        self.shoes.as_ref()
    }

    pub fn accessory(&self) -> Option<&ClothingItem> {
        self.accessory.as_ref()
    }

    /// True when no slot holds an item.
    pub fn is_empty(&self) -> bool {
        Slot::ALL.iter().all(|&slot| self.get(slot).is_none())
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<ClothingItem> {
        match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
            Slot::Shoes => &mut self.shoes,
            Slot::Accessory => &mut self.accessory,
        }
    }

    /// Selects or deselects `item` in the slot its category maps to.
    ///
    /// Clicking the item already held by the slot clears it; anything else
    /// replaces the slot's content unconditionally. Other slots are never
    /// touched, and there are no error conditions.
    pub fn toggle_select(&mut self, item: &ClothingItem) {
        let slot = self.slot_mut(Slot::for_category(item.category));
        let deselect = slot.as_ref().is_some_and(|current| current.id == item.id);
        *slot = if deselect { None } else { Some(item.clone()) };
    }

    /// True if `item` is currently held by any of the four slots.
    pub fn is_selected(&self, item: &ClothingItem) -> bool {
        Slot::ALL
            .iter()
            .filter_map(|&slot| self.get(slot))
            .any(|held| held.id == item.id)
    }

    /// Replaces the top/bottom/shoes slots with suggested candidates,
    /// clearing slots the engine produced nothing for. The accessory slot
    /// is left alone.
    pub(crate) fn apply_suggested(
        &mut self,
        top: Option<ClothingItem>,
        bottom: Option<ClothingItem>,
        shoes: Option<ClothingItem>,
    ) {
        self.top = top;
        self.bottom = bottom;
        self.shoes = shoes;
    }

    /// Snapshots the selection into a new [`OutfitRecord`].
    ///
    /// Requires at least one of top/bottom/shoes to be occupied (an
    /// accessory alone is not an outfit). A blank `name` defaults to
    /// "My Outfit"; a blank `occasion` falls back to the first non-empty
    /// occasion among the selected top, bottom and shoes, else stays
    /// empty. The record's `thumb` is left unset; rendering it is the
    /// save flow's job.
    pub fn to_outfit_record(&self, name: &str, occasion: &str) -> Result<OutfitRecord, Error> {
        if self.top.is_none() && self.bottom.is_none() && self.shoes.is_none() {
            return Err(Error::validation("select at least one item"));
        }

        let name = match name.trim() {
            "" => "My Outfit".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        let occasion = match occasion.trim() {
            "" => self.derived_occasion().unwrap_or_default(),
            explicit => explicit.to_owned(),
        };

        Ok(OutfitRecord {
            id: OutfitId::generate(),
            name,
            top_id: self.top.as_ref().map(|item| item.id.clone()),
            bottom_id: self.bottom.as_ref().map(|item| item.id.clone()),
            shoes_id: self.shoes.as_ref().map(|item| item.id.clone()),
            accessory_id: self.accessory.as_ref().map(|item| item.id.clone()),
            occasion,
            thumb: None,
            created_at: Utc::now(),
        })
    }

    /// First non-empty occasion among the selected top, bottom and shoes.
    fn derived_occasion(&self) -> Option<String> {
        [&self.top, &self.bottom, &self.shoes]
            .into_iter()
            .flatten()
            .map(|item| item.occasion.trim())
            .find(|occasion| !occasion.is_empty())
            .map(str::to_owned)
    }

    /// Restores the selection from a saved record, resolving each id
    /// against `catalog`. Stale references resolve to an empty slot
    /// rather than failing.
    pub fn load_from_record(&mut self, record: &OutfitRecord, catalog: &[ClothingItem]) {
        let resolve = |id: &Option<ItemId>| {
            id.as_ref()
                .and_then(|id| catalog.iter().find(|item| item.id == *id))
                .cloned()
        };
        self.top = resolve(&record.top_id);
        self.bottom = resolve(&record.bottom_id);
        self.shoes = resolve(&record.shoes_id);
        self.accessory = resolve(&record.accessory_id);
    }

    /// The images of the occupied slots, in top, bottom, shoes, accessory
    /// order. This is the layer order handed to the compositor.
    pub fn occupied_images(&self) -> Vec<&ImageData> {
        Slot::ALL
            .iter()
            .filter_map(|&slot| self.get(slot))
            .map(|item| &item.image)
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
