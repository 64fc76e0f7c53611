// Turns decoded drafts into linked, immutable items.
//
// Both parse strategies first assemble a `Draft` tree (attributes decoded,
// children already in aggregation order). Items are then created bottom-up
// from an explicit stack of open drafts, and a second top-down pass sets the
// back-references and owning notebook. Neither pass recurses, so nesting
// depth is bounded by the heap and not by the thread's stack.

use std::mem;
use std::sync::{Arc, OnceLock, Weak};
use std::vec;

use crate::types::item::PathSegment;
use crate::types::{Details, Item, ItemInfo, ItemKind, Page};

/// An item whose attributes are decoded but which is not yet linked into a tree.
#[derive(Debug)]
pub(crate) struct Draft {
    pub info: ItemInfo,
    pub details: Details,
    pub children: Vec<Draft>,
}

impl Draft {
    pub fn new(info: ItemInfo, details: Details) -> Self {
        Self {
            info,
            details,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn with_children(mut self, children: Vec<Draft>) -> Self {
        self.children = children;
        self
    }

    fn into_parts(mut self) -> (ItemInfo, Details, Vec<Draft>) {
        let details = mem::replace(&mut self.details, Details::Page(Page::default()));
        (
            mem::take(&mut self.info),
            details,
            mem::take(&mut self.children),
        )
    }
}

impl Drop for Draft {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut draft) = pending.pop() {
            pending.append(&mut draft.children);
        }
    }
}

/// A draft whose children are being turned into items.
struct Frame {
    info: ItemInfo,
    details: Details,
    ancestry: Arc<PathSegment>,
    pending: vec::IntoIter<Draft>,
    built: Vec<Arc<Item>>,
}

impl Frame {
    fn open(draft: Draft, parent: Option<Arc<PathSegment>>) -> Self {
        let (info, details, children) = draft.into_parts();
        let ancestry = PathSegment::new(parent, &info.name);
        Self {
            info,
            details,
            ancestry,
            built: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
        }
    }

    fn close(self) -> Arc<Item> {
        Arc::new(Item {
            info: self.info,
            details: self.details,
            ancestry: self.ancestry,
            relative_path: OnceLock::new(),
            parent: OnceLock::new(),
            notebook: OnceLock::new(),
            children: self.built,
        })
    }
}

/// Create the items of a draft tree, children before their parents.
fn assemble(draft: Draft, parent: Option<Arc<PathSegment>>) -> Arc<Item> {
    let mut open: Vec<Frame> = Vec::new();
    let mut current = Frame::open(draft, parent);
    loop {
        match current.pending.next() {
            Some(child) => {
                let ancestry = Some(Arc::clone(&current.ancestry));
                open.push(mem::replace(&mut current, Frame::open(child, ancestry)));
            }
            None => {
                let item = current.close();
                match open.pop() {
                    Some(mut parent) => {
                        parent.built.push(item);
                        current = parent;
                    }
                    None => return item,
                }
            }
        }
    }
}

/// Set back-references and the owning notebook on `root` and everything below it.
fn link(root: &Arc<Item>, parent: Weak<Item>, notebook: Weak<Item>) {
    let _ = root.parent.set(parent);
    let _ = root.notebook.set(notebook.clone());

    let mut pending = vec![root];
    while let Some(item) = pending.pop() {
        for child in &item.children {
            let _ = child.parent.set(Arc::downgrade(item));
            let _ = child.notebook.set(notebook.clone());
            pending.push(child);
        }
    }
}

/// Link a notebook draft as the root of a new tree.
pub(crate) fn build_root(draft: Draft) -> Arc<Item> {
    build_under(draft, None)
}

/// Link a draft under an item from an existing tree.
pub(crate) fn build_under(draft: Draft, parent: Option<&Arc<Item>>) -> Arc<Item> {
    // A notebook is always a root, whatever context it was parsed in.
    let parent = parent.filter(|_| draft.kind() != ItemKind::Notebook);

    let root = assemble(draft, parent.map(|p| Arc::clone(&p.ancestry)));
    let (parent_ref, notebook) = match parent {
        Some(parent) => (
            Arc::downgrade(parent),
            parent.notebook.get().cloned().unwrap_or_default(),
        ),
        None if root.is_notebook() => (Weak::new(), Arc::downgrade(&root)),
        None => (Weak::new(), Weak::new()),
    };
    link(&root, parent_ref, notebook);
    root
}
