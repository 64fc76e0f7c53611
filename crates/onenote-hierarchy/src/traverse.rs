use std::sync::Arc;

use crate::types::{Details, Item, ItemKind};

/// Pre-order, depth-first walk over items and their descendants.
///
/// Items at every level come out in the same order as [`Item::children`].
pub struct Traverse<'a> {
    stack: Vec<&'a Arc<Item>>,
}

impl<'a> Traverse<'a> {
    fn new(roots: &'a [Arc<Item>]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a Arc<Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children.iter().rev());
        Some(item)
    }
}

impl Item {
    /// This item followed by all of its descendants.
    pub fn traverse(self: &Arc<Self>) -> Traverse<'_> {
        Traverse {
            stack: vec![self],
        }
    }

    /// Every page under this item, in traversal order.
    pub fn descendant_pages(self: &Arc<Self>) -> impl Iterator<Item = &Arc<Item>> {
        self.traverse().filter(|item| item.kind() == ItemKind::Page)
    }

    /// Whether the item is the recycle bin itself or something thrown into it.
    pub fn is_in_recycle_bin(&self) -> bool {
        match &self.details {
            Details::Notebook(_) => false,
            Details::SectionGroup(group) => group.is_recycle_bin,
            Details::Section(section) => section.is_in_recycle_bin || section.is_deleted_pages,
            Details::Page(page) => page.is_in_recycle_bin,
        }
    }

    /// The notebook's recycle-bin section group, if it has one.
    pub fn recycle_bin(&self) -> Option<&Arc<Item>> {
        if !self.is_notebook() {
            return None;
        }
        self.section_groups()
            .find(|group| group.as_section_group().is_some_and(|g| g.is_recycle_bin))
    }
}

/// Walk several trees one after another.
pub fn traverse_all(items: &[Arc<Item>]) -> Traverse<'_> {
    Traverse::new(items)
}

/// All pages under the given items.
pub fn pages_of(items: &[Arc<Item>]) -> impl Iterator<Item = &Arc<Item>> {
    traverse_all(items).filter(|item| item.kind() == ItemKind::Page)
}

/// First item with the given identifier, in traversal order.
pub fn find_by_id<'a>(items: &'a [Arc<Item>], id: &str) -> Option<&'a Arc<Item>> {
    traverse_all(items).find(|item| item.id() == id)
}
