// Caller-owned facade over a hierarchy source and a parser strategy.

use std::sync::Arc;

use log::debug;

use crate::traverse::pages_of;
use crate::types::Item;
use crate::{HierarchyError, HierarchyParser, Result, TreeParser};

/// Where hierarchy XML comes from, typically a live OneNote application.
///
/// Implementations own the connection and its lifecycle. Failures should be
/// reported as [`HierarchyError::Source`].
pub trait HierarchySource {
    /// The whole notebook hierarchy, down to pages.
    fn full_hierarchy_xml(&self) -> Result<String>;

    /// Pages matching `query`, either across all notebooks (`scope_id` is
    /// `None`) or within one item. A scoped search returns a single fragment
    /// rooted at the scope.
    fn scoped_search_xml(&self, scope_id: Option<&str>, query: &str) -> Result<String>;

    /// One item and its subtree.
    fn single_item_xml(&self, item_id: &str) -> Result<String>;
}

/// Pages found by a search.
///
/// Holds the parsed trees the pages belong to, so their parent and notebook
/// links stay valid for as long as the matches are kept.
#[derive(Debug)]
pub struct PageMatches {
    roots: Vec<Arc<Item>>,
}

impl PageMatches {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Item>> {
        pages_of(&self.roots)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The trees the search returned.
    pub fn roots(&self) -> &[Arc<Item>] {
        &self.roots
    }
}

impl<'a> IntoIterator for &'a PageMatches {
    type Item = &'a Arc<Item>;
    type IntoIter = Box<dyn Iterator<Item = &'a Arc<Item>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub struct Session<S, P = TreeParser> {
    source: S,
    parser: P,
}

impl<S: HierarchySource> Session<S> {
    pub fn new(source: S) -> Self {
        Self::with_parser(source, TreeParser)
    }
}

impl<S: HierarchySource, P: HierarchyParser> Session<S, P> {
    pub fn with_parser(source: S, parser: P) -> Self {
        Self { source, parser }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and parse every notebook.
    pub fn notebooks(&self) -> Result<Vec<Arc<Item>>> {
        let xml = self.source.full_hierarchy_xml()?;
        debug!("Fetched full hierarchy ({} bytes)", xml.len());

        let notebooks = self.parser.parse_all(&xml)?;
        debug!("Parsed {} notebooks", notebooks.len());
        Ok(notebooks)
    }

    /// Search every notebook for pages matching `query`.
    pub fn find_pages(&self, query: &str) -> Result<PageMatches> {
        validate_search(query)?;

        let xml = self.source.scoped_search_xml(None, query)?;
        debug!("Search {query:?} returned {} bytes", xml.len());

        let roots = self.parser.parse_all(&xml)?;
        Ok(PageMatches { roots })
    }

    /// Search for pages matching `query` within `scope`.
    ///
    /// The returned fragment is rooted at the scope, so it is attached under
    /// the scope's own parent.
    pub fn find_pages_in(&self, query: &str, scope: &Arc<Item>) -> Result<PageMatches> {
        validate_search(query)?;

        let xml = self.source.scoped_search_xml(Some(scope.id()), query)?;
        debug!(
            "Search {query:?} in {} returned {} bytes",
            scope.relative_path(),
            xml.len()
        );

        let root = self.parser.parse_single(&xml, scope.parent().as_ref())?;
        Ok(PageMatches { roots: vec![root] })
    }

    /// Re-fetch one item, attached under the item's current parent.
    ///
    /// The old tree is left untouched; the fresh item is a new subtree.
    pub fn refresh(&self, item: &Arc<Item>) -> Result<Arc<Item>> {
        let xml = self.source.single_item_xml(item.id())?;
        debug!("Refreshing {} ({} bytes)", item.relative_path(), xml.len());

        self.parser.parse_single(&xml, item.parent().as_ref())
    }
}

/// Queries must be non-blank and start with a letter or digit.
fn validate_search(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(HierarchyError::InvalidSearch(
            "search cannot be empty or only whitespace".to_string(),
        ));
    }
    if !query.chars().next().is_some_and(char::is_alphanumeric) {
        return Err(HierarchyError::InvalidSearch(format!(
            "search must start with a letter or a digit: {query:?}"
        )));
    }
    Ok(())
}
