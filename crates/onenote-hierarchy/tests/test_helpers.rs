#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use onenote_hierarchy::{
    HierarchyParser, Item, ItemKind, Strategy, schema::RELATIVE_PATH_SEPARATOR, traverse_all,
};

/// Both parser strategies, for tests that must hold for either.
pub const STRATEGIES: [Strategy; 2] = [Strategy::Tree, Strategy::Stream];

/// Read an XML fixture from `tests/data`.
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

/// The longest prefix of `s` that is at most `len` bytes and ends on a
/// character boundary.
pub fn prefix(s: &str, len: usize) -> &str {
    let end = (0..=len.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// Parse a full-hierarchy fixture with the given strategy.
pub fn parse_fixture(strategy: Strategy, name: &str) -> Vec<Arc<Item>> {
    strategy
        .parse_all(&load_fixture(name))
        .unwrap_or_else(|e| panic!("{strategy:?} failed to parse {name}: {e}"))
}

pub fn count_kind(items: &[Arc<Item>], kind: ItemKind) -> usize {
    traverse_all(items).filter(|item| item.kind() == kind).count()
}

/// A childless notebook to attach fragments under.
pub fn notebook_stub() -> Arc<Item> {
    onenote_hierarchy::parse_single(
        r#"<Notebook name="Test Notebook" ID="{stub-notebook}" />"#,
        None,
    )
    .expect("notebook stub")
}

/// A childless section inside `notebook`.
pub fn section_stub(notebook: &Arc<Item>) -> Arc<Item> {
    onenote_hierarchy::parse_single(
        r#"<Section name="Test Section" ID="{stub-section}" />"#,
        Some(notebook),
    )
    .expect("section stub")
}

/// Check the relative path and back-reference invariants on every node
/// under `notebooks`.
pub fn assert_tree_invariants(notebooks: &[Arc<Item>]) {
    for notebook in notebooks {
        assert!(notebook.is_notebook());
        assert!(notebook.parent().is_none(), "{} has a parent", notebook.name());
        assert_eq!(notebook.relative_path(), notebook.name());

        for item in notebook.traverse() {
            let owner = item.notebook().expect("owning notebook is alive");
            assert!(
                Arc::ptr_eq(&owner, notebook),
                "{} is owned by {} instead of {}",
                item.relative_path(),
                owner.name(),
                notebook.name()
            );

            for child in item.children() {
                let parent = child.parent().expect("parent is alive");
                assert!(Arc::ptr_eq(&parent, item), "{} has the wrong parent", child.relative_path());
                assert!(child.kind().can_nest_in(item.kind()));
                assert_eq!(
                    child.relative_path(),
                    format!(
                        "{}{RELATIVE_PATH_SEPARATOR}{}",
                        item.relative_path(),
                        child.name()
                    )
                );
            }
        }
    }
}

pub fn names(items: &[Arc<Item>]) -> Vec<&str> {
    items.iter().map(|item| item.name()).collect()
}
