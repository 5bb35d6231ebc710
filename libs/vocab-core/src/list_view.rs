//! Filtered, paginated view over a loaded dataset.
//!
//! One `ListView` instance backs one browser page: the card grid and the
//! letter/sound table both drive it with their own record type. The view
//! owns its records; the renderer reads `visible_items` and
//! `pagination_model` after each state change.

use crate::types::ViewRecord;
use serde::Serialize;

/// Category value that clears the category constraint.
pub const ALL_CATEGORIES: &str = "all";

/// Derived summary for rendering pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationModel {
    pub has_prev: bool,
    pub has_next: bool,
    pub page_numbers: Vec<usize>,
    pub current_page: usize,
}

/// Paginated view of a record sequence, filtered by category and search
/// term. Filters compose with logical AND; changing either one resets the
/// view to page 1.
#[derive(Debug)]
pub struct ListView<R> {
    source: Vec<R>,
    filter_category: Option<String>,
    search_term: String,
    derived: Vec<usize>,
    page: usize,
    page_size: usize,
}

impl<R: ViewRecord> ListView<R> {
    /// Build a view over already-validated records. An empty source is a
    /// valid degraded state, rendered as "no results" by the caller.
    pub fn new(source: Vec<R>, page_size: usize) -> Self {
        let derived = (0..source.len()).collect();
        Self {
            source,
            filter_category: None,
            search_term: String::new(),
            derived,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Set the substring search term. The term is trimmed and lowercased;
    /// matching is case-insensitive on the record name.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
        self.rebuild();
    }

    /// Set the category filter. `"all"` clears the constraint; anything
    /// else must equal the record category exactly. Locked categories are
    /// disabled at the affordance level by the caller, not here.
    pub fn set_category_filter(&mut self, category: &str) {
        self.filter_category = if category == ALL_CATEGORIES {
            None
        } else {
            Some(category.to_string())
        };
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let derived: Vec<usize> = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(i, _)| i)
            .collect();
        self.derived = derived;
        self.page = 1;
    }

    fn matches(&self, record: &R) -> bool {
        if let Some(ref category) = self.filter_category {
            if record.category() != Some(category.as_str()) {
                return false;
            }
        }
        self.search_term.is_empty() || record.name().to_lowercase().contains(&self.search_term)
    }

    /// Go to page `n`, clamped into `1..=total_pages()`.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages());
    }

    pub fn total_pages(&self) -> usize {
        self.derived.len().div_ceil(self.page_size).max(1)
    }

    /// The slice of the derived set shown on the current page.
    pub fn visible_items(&self) -> Vec<&R> {
        let start = (self.page - 1) * self.page_size;
        self.derived
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.source[i])
            .collect()
    }

    pub fn pagination_model(&self) -> PaginationModel {
        let total = self.total_pages();
        PaginationModel {
            has_prev: self.page > 1,
            has_next: self.page < total,
            page_numbers: (1..=total).collect(),
            current_page: self.page,
        }
    }

    /// Resolve a slot on the current page to its record, for the caller to
    /// persist the selection and navigate. Returns `None` for out-of-range
    /// slots and for locked records, which must not be activatable.
    pub fn activate(&self, slot: usize) -> Option<&R> {
        let record = *self.visible_items().get(slot)?;
        if record.is_locked() {
            return None;
        }
        Some(record)
    }
}
