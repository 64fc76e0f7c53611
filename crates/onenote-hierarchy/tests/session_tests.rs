mod test_helpers;

use std::cell::RefCell;
use std::sync::Arc;

use onenote_hierarchy::{
    HierarchyError, HierarchySource, ItemKind, Result, Session, StreamParser, find_by_id,
};
use test_helpers::*;

const LISBON: &str = "{7EA00000-0000-4000-8000-000000000003}{1}{B0}";
const EUROPE: &str = "{7EA00000-0000-4000-8000-000000000002}{1}{B0}";

/// Serves the travel fixture and records what was asked for.
#[derive(Default)]
struct FixtureSource {
    calls: RefCell<Vec<String>>,
}

impl HierarchySource for FixtureSource {
    fn full_hierarchy_xml(&self) -> Result<String> {
        self.calls.borrow_mut().push("full".to_string());
        Ok(load_fixture("OneLevel.xml"))
    }

    fn scoped_search_xml(&self, scope_id: Option<&str>, query: &str) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("search {scope_id:?} {query}"));
        match scope_id {
            None => Ok(load_fixture("OneLevel.xml")),
            Some(_) => Ok(load_fixture("ScopedSearch.xml")),
        }
    }

    fn single_item_xml(&self, item_id: &str) -> Result<String> {
        self.calls.borrow_mut().push(format!("item {item_id}"));
        Ok(format!(
            r#"<one:Section xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote" name="Lisbon" ID="{item_id}" color="none"><one:Page name="Itinerary" ID="p1"/><one:Page name="Food" ID="p2"/></one:Section>"#
        ))
    }
}

struct FailingSource;

impl HierarchySource for FailingSource {
    fn full_hierarchy_xml(&self) -> Result<String> {
        Err(HierarchyError::Source("OneNote is not running".into()))
    }

    fn scoped_search_xml(&self, _: Option<&str>, _: &str) -> Result<String> {
        Err(HierarchyError::Source("OneNote is not running".into()))
    }

    fn single_item_xml(&self, _: &str) -> Result<String> {
        Err(HierarchyError::Source("OneNote is not running".into()))
    }
}

#[test]
fn notebooks() {
    let session = Session::new(FixtureSource::default());
    let notebooks = session.notebooks().unwrap();
    assert_eq!(names(&notebooks), ["Travel"]);
    assert_tree_invariants(&notebooks);
    assert_eq!(*session.source().calls.borrow(), ["full"]);
}

#[test]
fn find_pages_everywhere() {
    let session = Session::with_parser(FixtureSource::default(), StreamParser);
    let matches = session.find_pages("Itinerary").unwrap();

    assert_eq!(matches.len(), 2);
    let pages: Vec<_> = matches.iter().map(|p| p.relative_path()).collect();
    assert_eq!(pages, [r"Travel\Packing\Checklist", r"Travel\Europe\Lisbon\Itinerary"]);

    // The matches own their trees, so the links still resolve.
    for page in &matches {
        assert_eq!(page.notebook().unwrap().name(), "Travel");
        assert_eq!(page.parent().unwrap().kind(), ItemKind::Section);
    }
}

#[test]
fn find_pages_in_scope() {
    let session = Session::new(FixtureSource::default());
    let notebooks = session.notebooks().unwrap();
    let europe = find_by_id(&notebooks, EUROPE).unwrap();

    let matches = session.find_pages_in("Itinerary", europe).unwrap();
    assert_eq!(matches.len(), 1);

    let page = matches.iter().next().unwrap();
    assert_eq!(page.relative_path(), r"Travel\Europe\Lisbon\Itinerary");
    assert!(Arc::ptr_eq(&page.notebook().unwrap(), &notebooks[0]));

    // The result is a fresh subtree attached where the scope lives.
    let root = &matches.roots()[0];
    assert!(root.same_item(europe));
    assert!(!Arc::ptr_eq(root, europe));
    assert!(Arc::ptr_eq(&root.parent().unwrap(), &notebooks[0]));

    assert_eq!(
        session.source().calls.borrow().last().unwrap(),
        &format!("search Some({EUROPE:?}) Itinerary")
    );
}

#[test]
fn refresh_reparses_under_current_parent() {
    let session = Session::new(FixtureSource::default());
    let notebooks = session.notebooks().unwrap();
    let lisbon = find_by_id(&notebooks, LISBON).unwrap();
    assert_eq!(lisbon.pages().count(), 1);

    let fresh = session.refresh(lisbon).unwrap();
    assert!(fresh.same_item(lisbon));
    assert_eq!(fresh.relative_path(), lisbon.relative_path());
    assert_eq!(fresh.pages().count(), 2);
    assert!(fresh.color().is_none());
    assert!(Arc::ptr_eq(
        &fresh.parent().unwrap(),
        &lisbon.parent().unwrap()
    ));

    // The tree the item came from is not touched.
    assert_eq!(lisbon.pages().count(), 1);
}

#[test]
fn invalid_searches_never_reach_the_source() {
    let session = Session::new(FixtureSource::default());
    let notebooks = session.notebooks().unwrap();

    for query in ["", "  ", "*travel", "(a OR b)"] {
        let err = session.find_pages(query).unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidSearch(_)), "{query:?}: {err}");

        let err = session.find_pages_in(query, &notebooks[0]).unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidSearch(_)), "{query:?}: {err}");
    }
    assert_eq!(*session.source().calls.borrow(), ["full"]);
}

#[test]
fn source_failures_propagate() {
    let session = Session::new(FailingSource);
    let err = session.notebooks().unwrap_err();
    assert!(matches!(err, HierarchyError::Source(_)));
    assert_eq!(
        err.to_string(),
        "Hierarchy source failed: OneNote is not running"
    );
    assert!(matches!(
        session.find_pages("anything").unwrap_err(),
        HierarchyError::Source(_)
    ));
}
