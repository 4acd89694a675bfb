use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reserved category id meaning "no category restriction".
pub const ALL_CATEGORY: &str = "all";

/// One category chip: stable id, display label, and the declared record count.
///
/// The count is informational configuration surfaced as-is. It is never
/// recomputed from the live record store and may diverge from the number of
/// records actually carrying the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub count: usize,
}

impl Category {
    pub fn new(id: &str, label: &str, count: usize) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            count,
        }
    }
}

/// The fixed category set for one catalog domain.
///
/// Guarantees that [`ALL_CATEGORY`] is always present and resolvable.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    /// Build an index from the configured category set.
    ///
    /// If the set does not already declare [`ALL_CATEGORY`], an entry is
    /// prepended with a zero count so `resolve("all")` always succeeds.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut categories = categories;
        if !categories.iter().any(|c| c.id == ALL_CATEGORY) {
            categories.insert(0, Category::new(ALL_CATEGORY, "All", 0));
        }
        Self { categories }
    }

    /// All categories in declaration order.
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn resolve(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolve an id, degrading to the [`ALL_CATEGORY`] entry when unknown.
    ///
    /// A stale or mistyped selection must not produce an unrecoverable empty
    /// view, so it falls back to the unrestricted category. The fallback is
    /// logged as a data-integrity warning, not surfaced as an error.
    pub fn resolve_or_all(&self, id: &str) -> &Category {
        match self.resolve(id) {
            Some(category) => category,
            None => {
                warn!(category_id = id, "unknown category id, falling back to \"all\"");
                self.all()
            }
        }
    }

    fn all(&self) -> &Category {
        self.categories
            .iter()
            .find(|c| c.id == ALL_CATEGORY)
            .expect("constructor guarantees the \"all\" category")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_entry_is_prepended_when_missing() {
        let index = CategoryIndex::new(vec![Category::new("crypto", "Cryptography", 12)]);
        assert_eq!(index.list()[0].id, ALL_CATEGORY);
        assert_eq!(index.list().len(), 2);
    }

    #[test]
    fn declared_all_entry_is_kept() {
        let index = CategoryIndex::new(vec![
            Category::new("all", "All Articles", 42),
            Category::new("privacy", "Privacy", 8),
        ]);
        let all: Vec<&Category> = index.list().iter().filter(|c| c.id == ALL_CATEGORY).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].label, "All Articles");
        assert_eq!(all[0].count, 42);
    }

    #[test]
    fn list_preserves_declaration_order() {
        let index = CategoryIndex::new(vec![
            Category::new("all", "All", 0),
            Category::new("hardware", "Hardware", 42),
            Category::new("software", "Software", 38),
        ]);
        let ids: Vec<&str> = index.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["all", "hardware", "software"]);
    }

    #[test]
    fn resolve_finds_known_ids_only() {
        let index = CategoryIndex::new(vec![Category::new("tech", "Technology", 7)]);
        assert!(index.resolve("tech").is_some());
        assert!(index.resolve("all").is_some());
        assert!(index.resolve("nonexistent-category").is_none());
    }

    #[test]
    fn unknown_id_degrades_to_all() {
        let index = CategoryIndex::new(vec![Category::new("glitch", "Glitch Art", 18)]);
        assert_eq!(index.resolve_or_all("nonexistent-category").id, ALL_CATEGORY);
        assert_eq!(index.resolve_or_all("glitch").id, "glitch");
    }
}
