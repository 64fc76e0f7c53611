// Materializing strategy: the whole document is parsed with roxmltree, then
// walked with an explicit stack of open containers.

use std::borrow::Cow;
use std::mem;
use std::vec;

use roxmltree::{Document, Node};

use crate::Result;
use crate::builder::Draft;
use crate::decode::decode;
use crate::dispatch::resolve_root;
use crate::schema::elements;
use crate::types::ItemKind;

/// Parse a full hierarchy document into one draft per notebook.
pub(crate) fn parse_notebooks(xml: &str) -> Result<Vec<Draft>> {
    let doc = Document::parse(xml)?;

    child_elements(doc.root_element(), elements::NOTEBOOK)
        .map(|node| parse_container(node, ItemKind::Notebook))
        .collect()
}

/// Parse a single fragment whose root kind is only known from its tag.
pub(crate) fn parse_fragment(xml: &str, parent: Option<ItemKind>) -> Result<Draft> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    let kind = resolve_root(root.tag_name().name(), parent)?;

    match kind {
        ItemKind::Notebook | ItemKind::SectionGroup => parse_container(root, kind),
        ItemKind::Section => parse_section(root),
        ItemKind::Page => parse_element(root, ItemKind::Page),
    }
}

fn parse_element(node: Node, kind: ItemKind) -> Result<Draft> {
    decode(
        kind,
        node.attributes()
            .map(|attr| Ok((attr.name(), Cow::Borrowed(attr.value())))),
    )
}

/// A notebook or section group whose nested groups are still being read.
struct OpenContainer<'a, 'input> {
    draft: Draft,
    children: Vec<Draft>,
    groups: vec::IntoIter<Node<'a, 'input>>,
}

impl<'a, 'input> OpenContainer<'a, 'input> {
    fn open(node: Node<'a, 'input>, kind: ItemKind) -> Result<Self> {
        let draft = parse_element(node, kind)?;
        let children = child_elements(node, elements::SECTION)
            .map(parse_section)
            .collect::<Result<Vec<_>>>()?;
        let groups = child_elements(node, elements::SECTION_GROUP).collect::<Vec<_>>();

        Ok(Self {
            draft,
            children,
            groups: groups.into_iter(),
        })
    }
}

/// Notebooks and section groups: all sections first, then all section groups.
fn parse_container(node: Node, kind: ItemKind) -> Result<Draft> {
    let mut open = Vec::new();
    let mut current = OpenContainer::open(node, kind)?;
    loop {
        match current.groups.next() {
            Some(group) => {
                let next = OpenContainer::open(group, ItemKind::SectionGroup)?;
                open.push(mem::replace(&mut current, next));
            }
            None => {
                let draft = current.draft.with_children(current.children);
                match open.pop() {
                    Some(mut parent) => {
                        parent.children.push(draft);
                        current = parent;
                    }
                    None => return Ok(draft),
                }
            }
        }
    }
}

fn parse_section(node: Node) -> Result<Draft> {
    let section = parse_element(node, ItemKind::Section)?;

    let pages = child_elements(node, elements::PAGE)
        .map(|child| parse_element(child, ItemKind::Page))
        .collect::<Result<Vec<_>>>()?;

    Ok(section.with_children(pages))
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}
