//! Rule-based outfit suggestion.
//!
//! [`suggest`] narrows the catalog per category (preferring an occasion
//! match, falling back to the whole category), then draws one candidate
//! per core slot. The only harmonization pass is top→bottom: once a top is
//! chosen, bottoms sharing its color family are preferred. Shoes are drawn
//! independently and the accessory slot is never suggested; that
//! asymmetry matches the observed behavior and is kept deliberately.
//!
//! The random source is injected, so callers can pin outcomes with a
//! seeded [`StdRng`](rand::rngs::StdRng) while production uses entropy.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::item::{Category, ClothingItem};
use crate::selection::SelectionState;

// ============================================================================
// Suggestion
// ============================================================================

/// The outcome of one suggestion run: a candidate per core slot, each
/// possibly absent when its candidate set was empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suggestion<'a> {
    pub top: Option<&'a ClothingItem>,
    pub bottom: Option<&'a ClothingItem>,
    pub shoes: Option<&'a ClothingItem>,
}

impl Suggestion<'_> {
    /// Applies the suggestion to a selection: top/bottom/shoes are
    /// replaced (cleared where nothing was drawn), accessory is left as
    /// the user had it.
    pub fn apply_to(&self, selection: &mut SelectionState) {
        selection.apply_suggested(
            self.top.cloned(),
            self.bottom.cloned(),
            self.shoes.cloned(),
        );
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Draws a plausible top/bottom/shoes combination from `catalog`.
///
/// Candidate narrowing per category: with a non-empty `occasion`, items of
/// the category matching that occasion; when that set is empty (or no
/// occasion was given), every item of the category. An empty candidate set
/// at any stage yields an absent slot, never an error.
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use wardrobe_planner::suggest;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let suggestion = suggest(&[], Some("Party"), &mut rng);
/// assert!(suggestion.top.is_none());
/// ```
pub fn suggest<'a, R: Rng + ?Sized>(
    catalog: &'a [ClothingItem],
    occasion: Option<&str>,
    rng: &mut R,
) -> Suggestion<'a> {
    let top_candidates = candidates(catalog, Category::Top, occasion);
    let bottom_candidates = candidates(catalog, Category::Bottom, occasion);
    let shoe_candidates = candidates(catalog, Category::Shoes, occasion);

    let top = top_candidates.choose(rng).copied();

    let bottom = match top {
        Some(top) => {
            let harmonized = harmonized_bottoms(top, &bottom_candidates);
            if harmonized.is_empty() {
                bottom_candidates.choose(rng).copied()
            } else {
                harmonized.choose(rng).copied()
            }
        }
        None => bottom_candidates.choose(rng).copied(),
    };

    let shoes = shoe_candidates.choose(rng).copied();

    Suggestion { top, bottom, shoes }
}

/// Items of `category`, narrowed to `occasion` when that still leaves
/// candidates.
fn candidates<'a>(
    catalog: &'a [ClothingItem],
    category: Category,
    occasion: Option<&str>,
) -> Vec<&'a ClothingItem> {
    if let Some(occasion) = occasion.filter(|occasion| !occasion.is_empty()) {
        let matched: Vec<&ClothingItem> = catalog
            .iter()
            .filter(|item| item.category == category && item.occasion == occasion)
            .collect();
        if !matched.is_empty() {
            return matched;
        }
    }

    catalog
        .iter()
        .filter(|item| item.category == category)
        .collect()
}

/// Bottoms sharing the chosen top's color family. Empty when either color
/// label is blank.
fn harmonized_bottoms<'a>(
    top: &ClothingItem,
    bottoms: &[&'a ClothingItem],
) -> Vec<&'a ClothingItem> {
    let Some(family) = top.color_family() else {
        return Vec::new();
    };
    bottoms
        .iter()
        .copied()
        .filter(|bottom| bottom.color_family().as_deref() == Some(family.as_str()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
