//! Wardrobe browsing helpers: filtering and search over the catalog.

use crate::item::{Category, ClothingItem};

// ============================================================================
// CatalogFilter
// ============================================================================

/// Filter criteria for the wardrobe grid.
///
/// Every criterion is optional; unset criteria match everything. The four
/// metadata filters are exact matches, `search` is a case-insensitive
/// substring over the color label and the joined tag list.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub color: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// A filter matching the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Applies the filter, preserving catalog order.
    pub fn apply<'a>(&self, catalog: &'a [ClothingItem]) -> Vec<&'a ClothingItem> {
        catalog.iter().filter(|item| self.matches(item)).collect()
    }

    fn matches(&self, item: &ClothingItem) -> bool {
        if self.category.is_some_and(|category| item.category != category) {
            return false;
        }
        if self.color.as_ref().is_some_and(|color| item.color != *color) {
            return false;
        }
        if self.season.as_ref().is_some_and(|season| item.season != *season) {
            return false;
        }
        if self
            .occasion
            .as_ref()
            .is_some_and(|occasion| item.occasion != *occasion)
        {
            return false;
        }
        if let Some(query) = self.search.as_deref() {
            let query = query.to_lowercase();
            if !query.is_empty() {
                let in_color = item.color.to_lowercase().contains(&query);
                let in_tags = item.tags.join(" ").to_lowercase().contains(&query);
                if !in_color && !in_tags {
                    return false;
                }
            }
        }
        true
    }
}

/// Distinct color labels in first-seen order, for the color filter
/// dropdown.
pub fn distinct_colors(catalog: &[ClothingItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in catalog {
        if !seen.contains(&item.color) {
            seen.push(item.color.clone());
        }
    }
    seen
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ImageData;

    fn item(category: Category, color: &str, season: &str, tags: &[&str]) -> ClothingItem {
        ClothingItem::new(
            ImageData::new(vec![1]),
            category,
            color,
            season,
            "Casual",
            tags.iter().map(|t| t.to_string()).collect(),
        )
        .unwrap()
    }

    fn catalog() -> Vec<ClothingItem> {
        vec![
            item(Category::Top, "Red", "Winter", &["warm", "flannel"]),
            item(Category::Top, "Blue", "Summer", &["light"]),
            item(Category::Bottom, "Red", "Winter", &[]),
            item(Category::Shoes, "White", "Summer", &["sport"]),
        ]
    }

    #[test]
    fn unfiltered_returns_everything_in_order() {
        let catalog = catalog();
        let result = CatalogFilter::new().apply(&catalog);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].color, "Red");
    }

    #[test]
    fn filters_combine() {
        let catalog = catalog();
        let result = CatalogFilter::new()
            .with_category(Category::Top)
            .with_season("Winter")
            .apply(&catalog);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].color, "Red");
    }

    #[test]
    fn color_filter_is_exact() {
        let catalog = catalog();
        let result = CatalogFilter::new().with_color("Red").apply(&catalog);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn search_covers_color_and_tags() {
        let catalog = catalog();

        let by_color = CatalogFilter::new().with_search("blu").apply(&catalog);
        assert_eq!(by_color.len(), 1);
        assert_eq!(by_color[0].color, "Blue");

        let by_tag = CatalogFilter::new().with_search("FLANNEL").apply(&catalog);
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].color, "Red");

        let empty_query = CatalogFilter::new().with_search("").apply(&catalog);
        assert_eq!(empty_query.len(), 4);
    }

    #[test]
    fn distinct_colors_dedup_in_first_seen_order() {
        let catalog = catalog();
        assert_eq!(distinct_colors(&catalog), vec!["Red", "Blue", "White"]);
        assert!(distinct_colors(&[]).is_empty());
    }
}
