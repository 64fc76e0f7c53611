// OneNote hierarchy parser: typed, cross-referenced, immutable notebook trees
mod builder;
mod decode;
mod dispatch;
mod parse;
pub mod schema;
mod session;
mod stream;
mod traverse;
pub mod types;

pub use dispatch::kind_for_tag;
pub use schema::split_relative_path;
pub use session::{HierarchySource, PageMatches, Session};
pub use traverse::{Traverse, find_by_id, pages_of, traverse_all};
pub use types::*;

use std::sync::Arc;
use thiserror::Error;

/// Why a document could not be read as XML.
#[derive(Debug, Error)]
pub enum MalformedDocument {
    #[error(transparent)]
    Tree(#[from] roxmltree::Error),

    #[error(transparent)]
    Stream(#[from] quick_xml::Error),

    #[error(transparent)]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error(transparent)]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8 in name: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Structure(String),
}

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Malformed hierarchy document: {0}")]
    MalformedDocument(#[from] MalformedDocument),

    #[error("Unsupported item kind: <{tag}>")]
    UnsupportedItemKind { tag: String },

    #[error("Invalid value '{value}' for attribute '{attribute}'")]
    AttributeFormat {
        attribute: &'static str,
        value: String,
    },

    #[error("{kind} fragment needs a parent")]
    MissingParent { kind: ItemKind },

    #[error("{kind} cannot be placed under a {parent}")]
    InvalidParent { kind: ItemKind, parent: ItemKind },

    #[error("Invalid search query: {0}")]
    InvalidSearch(String),

    #[error("Hierarchy source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roxmltree::Error> for HierarchyError {
    fn from(err: roxmltree::Error) -> Self {
        MalformedDocument::from(err).into()
    }
}

impl From<quick_xml::Error> for HierarchyError {
    fn from(err: quick_xml::Error) -> Self {
        MalformedDocument::from(err).into()
    }
}

impl From<quick_xml::events::attributes::AttrError> for HierarchyError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        MalformedDocument::from(err).into()
    }
}

impl From<quick_xml::escape::EscapeError> for HierarchyError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        MalformedDocument::from(err).into()
    }
}

impl From<std::str::Utf8Error> for HierarchyError {
    fn from(err: std::str::Utf8Error) -> Self {
        MalformedDocument::from(err).into()
    }
}

pub type Result<T> = std::result::Result<T, HierarchyError>;

/// A strategy for turning hierarchy XML into item trees.
///
/// Every strategy produces structurally identical trees for the same input.
pub trait HierarchyParser {
    /// Parse a full hierarchy document into its notebooks.
    fn parse_all(&self, xml: &str) -> Result<Vec<Arc<Item>>>;

    /// Parse a single fragment of unknown kind, attached under `parent`.
    ///
    /// Notebook fragments ignore `parent`. Every other kind requires one it
    /// can nest in.
    fn parse_single(&self, xml: &str, parent: Option<&Arc<Item>>) -> Result<Arc<Item>>;
}

/// Materializes the document with roxmltree, then walks it with an explicit stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeParser;

impl HierarchyParser for TreeParser {
    fn parse_all(&self, xml: &str) -> Result<Vec<Arc<Item>>> {
        let notebooks = parse::parse_notebooks(xml)?;
        Ok(notebooks.into_iter().map(builder::build_root).collect())
    }

    fn parse_single(&self, xml: &str, parent: Option<&Arc<Item>>) -> Result<Arc<Item>> {
        let draft = parse::parse_fragment(xml, parent.map(|p| p.kind()))?;
        Ok(builder::build_under(draft, parent))
    }
}

/// Single forward pass with quick-xml and an explicit stack of open containers.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamParser;

impl HierarchyParser for StreamParser {
    fn parse_all(&self, xml: &str) -> Result<Vec<Arc<Item>>> {
        let notebooks = stream::StreamAssembler::new(xml).notebooks()?;
        Ok(notebooks.into_iter().map(builder::build_root).collect())
    }

    fn parse_single(&self, xml: &str, parent: Option<&Arc<Item>>) -> Result<Arc<Item>> {
        let draft = stream::StreamAssembler::new(xml).fragment(parent.map(|p| p.kind()))?;
        Ok(builder::build_under(draft, parent))
    }
}

/// Parser strategy picked at runtime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    Tree,
    Stream,
}

impl HierarchyParser for Strategy {
    fn parse_all(&self, xml: &str) -> Result<Vec<Arc<Item>>> {
        match self {
            Strategy::Tree => TreeParser.parse_all(xml),
            Strategy::Stream => StreamParser.parse_all(xml),
        }
    }

    fn parse_single(&self, xml: &str, parent: Option<&Arc<Item>>) -> Result<Arc<Item>> {
        match self {
            Strategy::Tree => TreeParser.parse_single(xml, parent),
            Strategy::Stream => StreamParser.parse_single(xml, parent),
        }
    }
}

/// Parse a full hierarchy document with the materializing strategy.
pub fn parse_all(xml: &str) -> Result<Vec<Arc<Item>>> {
    TreeParser.parse_all(xml)
}

/// Parse a single fragment with the materializing strategy.
pub fn parse_single(xml: &str, parent: Option<&Arc<Item>>) -> Result<Arc<Item>> {
    TreeParser.parse_single(xml, parent)
}
