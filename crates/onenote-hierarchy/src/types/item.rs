use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use jiff::Timestamp;

use super::Color;
use crate::schema::{elements, join_relative_path};

/// The four kinds of hierarchy item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Notebook,
    SectionGroup,
    Section,
    Page,
}

impl ItemKind {
    /// Local element name this kind is serialized as.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Notebook => elements::NOTEBOOK,
            Self::SectionGroup => elements::SECTION_GROUP,
            Self::Section => elements::SECTION,
            Self::Page => elements::PAGE,
        }
    }

    /// Whether an item of this kind may be a direct child of `parent`.
    pub fn can_nest_in(self, parent: ItemKind) -> bool {
        match self {
            Self::Notebook => false,
            Self::SectionGroup | Self::Section => {
                matches!(parent, Self::Notebook | Self::SectionGroup)
            }
            Self::Page => parent == Self::Section,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Attributes shared by every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInfo {
    pub id: String,
    pub name: String,
    pub unread: bool,
    pub last_modified: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    pub nickname: String,
    /// Full path of the notebook on disk (or its URL).
    pub path: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionGroup {
    pub path: String,
    /// The notebook's recycle bin.
    pub is_recycle_bin: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub path: String,
    pub color: Option<Color>,
    /// An encrypted section that has not been unlocked.
    pub locked: bool,
    pub encrypted: bool,
    pub is_in_recycle_bin: bool,
    /// The recycle bin section holding recently deleted pages.
    pub is_deleted_pages: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub level: i32,
    pub created: Timestamp,
    pub is_in_recycle_bin: bool,
}

/// Kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    Notebook(Notebook),
    SectionGroup(SectionGroup),
    Section(Section),
    Page(Page),
}

impl Details {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Notebook(_) => ItemKind::Notebook,
            Self::SectionGroup(_) => ItemKind::SectionGroup,
            Self::Section(_) => ItemKind::Section,
            Self::Page(_) => ItemKind::Page,
        }
    }
}

impl From<Notebook> for Details {
    fn from(value: Notebook) -> Self {
        Self::Notebook(value)
    }
}

impl From<SectionGroup> for Details {
    fn from(value: SectionGroup) -> Self {
        Self::SectionGroup(value)
    }
}

impl From<Section> for Details {
    fn from(value: Section) -> Self {
        Self::Section(value)
    }
}

impl From<Page> for Details {
    fn from(value: Page) -> Self {
        Self::Page(value)
    }
}

/// One name in a chain of ancestor names. Siblings share their parent's chain.
pub(crate) struct PathSegment {
    parent: Option<Arc<PathSegment>>,
    name: String,
}

impl PathSegment {
    pub(crate) fn new(parent: Option<Arc<PathSegment>>, name: &str) -> Arc<Self> {
        Arc::new(Self {
            parent,
            name: name.to_string(),
        })
    }

    fn join(&self) -> String {
        let mut names = vec![self.name.as_str()];
        let mut next = self.parent.as_deref();
        while let Some(segment) = next {
            names.push(&segment.name);
            next = segment.parent.as_deref();
        }
        join_relative_path(names.into_iter().rev())
    }
}

impl Drop for PathSegment {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(segment) = next {
            next = Arc::into_inner(segment).and_then(|mut segment| segment.parent.take());
        }
    }
}

/// A node of a parsed hierarchy.
///
/// The tree owns its nodes top-down through `children`. The `parent` and
/// owning-notebook links are weak, so they resolve only while some `Arc`
/// keeps the referenced node alive. Links are set once while the tree is
/// built; nodes are immutable once a parse call returns.
pub struct Item {
    pub(crate) info: ItemInfo,
    pub(crate) details: Details,
    pub(crate) ancestry: Arc<PathSegment>,
    pub(crate) relative_path: OnceLock<String>,
    pub(crate) parent: OnceLock<Weak<Item>>,
    pub(crate) notebook: OnceLock<Weak<Item>>,
    pub(crate) children: Vec<Arc<Item>>,
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn info(&self) -> &ItemInfo {
        &self.info
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn is_unread(&self) -> bool {
        self.info.unread
    }

    pub fn last_modified(&self) -> Timestamp {
        self.info.last_modified
    }

    /// Ancestor names from the notebook down to this item, joined by
    /// [`RELATIVE_PATH_SEPARATOR`](crate::schema::RELATIVE_PATH_SEPARATOR).
    pub fn relative_path(&self) -> &str {
        self.relative_path.get_or_init(|| self.ancestry.join())
    }

    /// Direct children: sections first, then section groups, each in
    /// document order. Pages for a section; empty for a page.
    pub fn children(&self) -> &[Arc<Item>] {
        &self.children
    }

    /// The containing item; `None` for a notebook.
    pub fn parent(&self) -> Option<Arc<Item>> {
        self.parent.get().and_then(Weak::upgrade)
    }

    /// The notebook this item belongs to. A notebook is its own notebook.
    pub fn notebook(&self) -> Option<Arc<Item>> {
        self.notebook.get().and_then(Weak::upgrade)
    }

    pub fn is_notebook(&self) -> bool {
        self.kind() == ItemKind::Notebook
    }

    pub fn as_notebook(&self) -> Option<&Notebook> {
        match &self.details {
            Details::Notebook(notebook) => Some(notebook),
            _ => None,
        }
    }

    pub fn as_section_group(&self) -> Option<&SectionGroup> {
        match &self.details {
            Details::SectionGroup(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match &self.details {
            Details::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_page(&self) -> Option<&Page> {
        match &self.details {
            Details::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Path on disk for notebooks, section groups and sections.
    pub fn path(&self) -> Option<&str> {
        match &self.details {
            Details::Notebook(n) => Some(&n.path),
            Details::SectionGroup(g) => Some(&g.path),
            Details::Section(s) => Some(&s.path),
            Details::Page(_) => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match &self.details {
            Details::Notebook(n) => n.color,
            Details::Section(s) => s.color,
            _ => None,
        }
    }

    /// Direct section children of a notebook or section group.
    pub fn sections(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.children_of_kind(ItemKind::Section)
    }

    /// Direct section group children of a notebook or section group.
    pub fn section_groups(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.children_of_kind(ItemKind::SectionGroup)
    }

    /// Pages of a section.
    pub fn pages(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.children_of_kind(ItemKind::Page)
    }

    fn children_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Arc<Item>> {
        self.children.iter().filter(move |child| child.kind() == kind)
    }

    /// Whether two items denote the same OneNote object.
    pub fn same_item(&self, other: &Item) -> bool {
        self.info.id == other.info.id
    }
}

fn linked_id(link: &OnceLock<Weak<Item>>) -> Option<String> {
    link.get()
        .and_then(Weak::upgrade)
        .map(|item| item.info.id.clone())
}

/// Deep structural equality. Back-references compare by identifier.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let same = a.info == b.info
                && a.details == b.details
                && a.relative_path() == b.relative_path()
                && linked_id(&a.parent) == linked_id(&b.parent)
                && linked_id(&a.notebook) == linked_id(&b.notebook)
                && a.children.len() == b.children.len();
            if !same {
                return false;
            }
            pending.extend(a.children.iter().map(|c| &**c).zip(b.children.iter().map(|c| &**c)));
        }
        true
    }
}

// Children are released from a heap stack so dropping a deep tree does not
// recurse once per level.
impl Drop for Item {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Some(mut child) = Arc::into_inner(child) {
                pending.append(&mut child.children);
            }
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("info", &self.info)
            .field("details", &self.details)
            .field("relative_path", &self.relative_path())
            .field("parent", &linked_id(&self.parent))
            .field("notebook", &linked_id(&self.notebook))
            .field("children", &self.children)
            .finish()
    }
}
