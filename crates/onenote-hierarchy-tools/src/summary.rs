//! Flat summaries of parsed hierarchies, shaped for text and JSON output.

use std::sync::Arc;

use onenote_hierarchy::{Details, Item, pages_of, traverse_all};
use serde::Serialize;

/// Item counts across a set of notebooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub notebooks: usize,
    pub section_groups: usize,
    pub sections: usize,
    pub pages: usize,
    pub unread_pages: usize,
    pub locked_sections: usize,
    /// Recycle bins plus everything inside them.
    pub recycle_bin_items: usize,
}

impl HierarchyStats {
    pub fn collect(notebooks: &[Arc<Item>]) -> Self {
        let mut stats = Self::default();

        for item in traverse_all(notebooks) {
            match item.details() {
                Details::Notebook(_) => stats.notebooks += 1,
                Details::SectionGroup(_) => stats.section_groups += 1,
                Details::Section(section) => {
                    stats.sections += 1;
                    if section.locked {
                        stats.locked_sections += 1;
                    }
                }
                Details::Page(_) => {
                    stats.pages += 1;
                    if item.is_unread() {
                        stats.unread_pages += 1;
                    }
                }
            }
            if item.is_in_recycle_bin() {
                stats.recycle_bin_items += 1;
            }
        }

        stats
    }
}

/// One page in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRow {
    pub id: String,
    pub name: String,
    pub relative_path: String,
    pub level: i32,
    pub created: String,
    pub last_modified: String,
    pub unread: bool,
    pub in_recycle_bin: bool,
}

impl PageRow {
    pub fn new(page: &Item) -> Option<Self> {
        let details = page.as_page()?;
        Some(Self {
            id: page.id().to_string(),
            name: page.name().to_string(),
            relative_path: page.relative_path().to_string(),
            level: details.level,
            created: details.created.to_string(),
            last_modified: page.last_modified().to_string(),
            unread: page.is_unread(),
            in_recycle_bin: details.is_in_recycle_bin,
        })
    }
}

/// Filter for page listings.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    /// Case-insensitive substring of the page name.
    pub query: Option<String>,
    pub include_recycle_bin: bool,
}

impl PageFilter {
    pub fn matches(&self, page: &Item) -> bool {
        if !self.include_recycle_bin && page.is_in_recycle_bin() {
            return false;
        }
        match &self.query {
            Some(query) => page.name().to_lowercase().contains(&query.to_lowercase()),
            None => true,
        }
    }
}

pub fn page_rows(notebooks: &[Arc<Item>], filter: &PageFilter) -> Vec<PageRow> {
    pages_of(notebooks)
        .filter(|page| filter.matches(page))
        .filter_map(|page| PageRow::new(page))
        .collect()
}
