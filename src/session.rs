//! Planning session: the explicit owner of catalog and selection state.
//!
//! [`PlannerSession`] replaces ambient globals with one object the UI
//! layer drives through plain function calls. Rendering code registers a
//! change listener instead of being reached into; the session notifies
//! after every selection-changing operation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::composite::{THUMB_HEIGHT, THUMB_WIDTH, composite};
use crate::error::Error;
use crate::item::ClothingItem;
use crate::outfit::OutfitRecord;
use crate::selection::SelectionState;
use crate::store::{CatalogStore, OutfitStore};
use crate::suggest::suggest;

/// Callback invoked with the selection after each change.
pub type ChangeListener = Box<dyn Fn(&SelectionState)>;

/// One outfit-planning session.
///
/// Owns the working copy of the catalog, the in-progress selection, and
/// the random source feeding the suggestion engine.
///
/// # Example
///
/// ```
/// use wardrobe_planner::{MemoryStore, PlannerSession};
///
/// let mut store = MemoryStore::new();
/// let mut session = PlannerSession::new(Vec::new());
///
/// session.suggest(Some("Party"));
/// // Nothing catalogued yet, so nothing was selected and saving fails.
/// assert!(session.save_outfit("Friday", "", &mut store).is_err());
/// ```
pub struct PlannerSession {
    catalog: Vec<ClothingItem>,
    selection: SelectionState,
    rng: StdRng,
    listeners: Vec<ChangeListener>,
}

impl PlannerSession {
    /// Creates a session over `catalog` with an OS-seeded random source.
    pub fn new(catalog: Vec<ClothingItem>) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Creates a session with a caller-supplied random source, letting
    /// tests pin suggestion outcomes via a fixed seed.
    pub fn with_rng(catalog: Vec<ClothingItem>, rng: StdRng) -> Self {
        Self {
            catalog,
            selection: SelectionState::new(),
            rng,
            listeners: Vec::new(),
        }
    }

    /// Creates a session from whatever the store currently holds.
    pub fn from_store(store: &dyn CatalogStore) -> Self {
        Self::new(store.list())
    }

    pub fn catalog(&self) -> &[ClothingItem] {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Re-reads the catalog from the store, keeping the selection as-is.
    pub fn refresh_catalog(&mut self, store: &dyn CatalogStore) {
        self.catalog = store.list();
    }

    /// Registers a listener notified after every selection change.
    pub fn on_change(&mut self, listener: impl Fn(&SelectionState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.selection);
        }
    }

    /// Toggle-selects `item` in its category's slot.
    pub fn toggle_select(&mut self, item: &ClothingItem) {
        self.selection.toggle_select(item);
        self.notify();
    }

    pub fn is_selected(&self, item: &ClothingItem) -> bool {
        self.selection.is_selected(item)
    }

    /// Runs the suggestion engine over the owned catalog and applies the
    /// outcome: top/bottom/shoes replaced, accessory untouched.
    pub fn suggest(&mut self, occasion: Option<&str>) {
        let suggestion = suggest(&self.catalog, occasion, &mut self.rng);
        suggestion.apply_to(&mut self.selection);
        self.notify();
    }

    /// Saves the current selection as a new outfit.
    ///
    /// Validates the selection, renders the composite thumbnail from the
    /// occupied slots, and hands the finished record to the store. On
    /// validation failure nothing is rendered or stored.
    pub fn save_outfit(
        &mut self,
        name: &str,
        occasion: &str,
        store: &mut dyn OutfitStore,
    ) -> Result<OutfitRecord, Error> {
        let mut record = self.selection.to_outfit_record(name, occasion)?;
        let sources = self.selection.occupied_images();
        record.thumb = Some(composite(&sources, THUMB_WIDTH, THUMB_HEIGHT)?);

        store.save(record.clone())?;
        debug!(id = %record.id, name = %record.name, "saved outfit");
        Ok(record)
    }

    /// Restores a saved outfit into the selection, resolving references
    /// against the owned catalog. Stale references leave their slot empty.
    pub fn load_outfit(&mut self, record: &OutfitRecord) {
        self.selection.load_from_record(record, &self.catalog);
        self.notify();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Category, ImageData};
    use crate::store::MemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn item(category: Category, color: &str) -> ClothingItem {
        ClothingItem::new(
            ImageData::new(vec![1, 2, 3]),
            category,
            color,
            "Summer",
            "Casual",
            Vec::new(),
        )
        .unwrap()
    }

    fn seeded(catalog: Vec<ClothingItem>) -> PlannerSession {
        PlannerSession::with_rng(catalog, StdRng::seed_from_u64(7))
    }

    #[test]
    fn listeners_fire_on_every_selection_change() {
        let top = item(Category::Top, "Red");
        let mut session = seeded(vec![top.clone()]);

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        session.on_change(move |_| counter.set(counter.get() + 1));

        session.toggle_select(&top);
        session.suggest(None);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn suggest_selects_from_owned_catalog() {
        let top = item(Category::Top, "Red");
        let bottom = item(Category::Bottom, "Red Pants");
        let mut session = seeded(vec![top.clone(), bottom.clone()]);

        session.suggest(None);

        assert_eq!(session.selection().top().map(|i| &i.id), Some(&top.id));
        assert_eq!(session.selection().bottom().map(|i| &i.id), Some(&bottom.id));
        assert!(session.selection().shoes().is_none());
    }

    #[test]
    fn save_outfit_renders_thumb_and_persists() {
        let top = item(Category::Top, "Red");
        let mut session = seeded(vec![top.clone()]);
        let mut store = MemoryStore::new();

        session.toggle_select(&top);
        let record = session.save_outfit("Look", "", &mut store).unwrap();

        assert!(record.thumb.is_some());
        assert_eq!(record.top_id.as_ref(), Some(&top.id));
        let listed = OutfitStore::list(&store);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], record);
    }

    #[test]
    fn save_outfit_rejects_empty_selection_without_storing() {
        let mut session = seeded(Vec::new());
        let mut store = MemoryStore::new();

        let err = session.save_outfit("Look", "", &mut store).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(OutfitStore::list(&store).is_empty());
    }

    #[test]
    fn load_outfit_round_trips_through_the_store() {
        let top = item(Category::Top, "Red");
        let shoes = item(Category::Shoes, "White");
        let catalog = vec![top.clone(), shoes.clone()];
        let mut store = MemoryStore::new();

        let mut session = seeded(catalog.clone());
        session.toggle_select(&top);
        session.toggle_select(&shoes);
        let record = session.save_outfit("Look", "", &mut store).unwrap();

        let mut fresh = seeded(catalog);
        fresh.load_outfit(&record);

        assert!(fresh.is_selected(&top));
        assert!(fresh.is_selected(&shoes));
        assert!(fresh.selection().bottom().is_none());
    }

    #[test]
    fn refresh_catalog_pulls_latest_store_state() {
        let mut store = MemoryStore::new();
        let mut session = PlannerSession::from_store(&store);
        assert!(session.catalog().is_empty());

        crate::store::CatalogStore::add(&mut store, item(Category::Top, "Red")).unwrap();
        session.refresh_catalog(&store);
        assert_eq!(session.catalog().len(), 1);
    }
}
