/// Faceted filter engine shared by the catalog servers.
///
/// One domain's record store is filtered by a free-text query and a selected
/// category, then partitioned into a featured block and a regular block. The
/// whole computation is a pure function of its inputs: no internal state, no
/// caching, nothing to invalidate when the store is swapped.
use crate::category::CategoryIndex;
use crate::record::CatalogRecord;

/// A compiled text + category predicate.
///
/// The query is folded to lowercase once at construction; matching is
/// case-insensitive substring containment, not ranking.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    needle: String,
    category_id: String,
    all_categories: bool,
}

impl CatalogFilter {
    /// Build a predicate from raw UI inputs.
    ///
    /// An unknown `category_id` degrades to `"all"` semantics via
    /// [`CategoryIndex::resolve_or_all`] rather than matching zero records.
    pub fn new(query: &str, category_id: &str, categories: &CategoryIndex) -> Self {
        let category = categories.resolve_or_all(category_id);
        Self {
            needle: query.to_lowercase(),
            category_id: category.id.clone(),
            all_categories: category.id == crate::category::ALL_CATEGORY,
        }
    }

    /// The resolved category id this filter restricts to.
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// Whether the filter leaves every category in.
    pub fn is_all_categories(&self) -> bool {
        self.all_categories
    }

    /// A record matches iff it matches the query AND the category.
    pub fn matches<R: CatalogRecord>(&self, record: &R) -> bool {
        self.matches_query(record) && self.matches_category(record)
    }

    /// An empty query matches every record. Otherwise the query must be a
    /// substring of the title, the body, or at least one tag, compared
    /// case-insensitively.
    fn matches_query<R: CatalogRecord>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record.title().to_lowercase().contains(&self.needle)
            || record.body().to_lowercase().contains(&self.needle)
            || record
                .tags()
                .iter()
                .any(|tag| tag.to_lowercase().contains(&self.needle))
    }

    fn matches_category<R: CatalogRecord>(&self, record: &R) -> bool {
        self.all_categories || record.category_id() == self.category_id
    }
}

/// A computed catalog view: the featured block followed by the regular block.
///
/// Borrowed from the record store; recomputed from scratch on every input
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a, R> {
    pub featured: Vec<&'a R>,
    pub regular: Vec<&'a R>,
}

impl<'a, R: CatalogRecord> View<'a, R> {
    /// Compute the view for one record store snapshot and one filter.
    ///
    /// Featured records are split out only while no category filter is
    /// active; once the user drills into a category they are demoted into
    /// the regular block, so no matching record ever renders twice. Both
    /// blocks preserve record-store order.
    pub fn compute(records: &'a [R], filter: &CatalogFilter) -> Self {
        let mut featured = Vec::new();
        let mut regular = Vec::new();
        for record in records.iter().filter(|r| filter.matches(*r)) {
            if record.featured() && filter.is_all_categories() {
                featured.push(record);
            } else {
                regular.push(record);
            }
        }
        Self { featured, regular }
    }

    /// The featured block followed by the regular block, store order within
    /// each.
    pub fn items(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.featured.iter().chain(self.regular.iter()).copied()
    }

    /// Whether nothing matched.
    ///
    /// Also true when the store itself is empty; a caller that needs a real
    /// loading state must track store readiness separately.
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.regular.is_empty()
    }

    pub fn len(&self) -> usize {
        self.featured.len() + self.regular.len()
    }
}

/// First featured record in store order, regardless of the active filter.
///
/// The single-spotlight convenience used by article-style pages; derived,
/// not separate state.
pub fn primary_featured<R: CatalogRecord>(records: &[R]) -> Option<&R> {
    records.iter().find(|r| r.featured())
}
