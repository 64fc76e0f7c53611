use crate::schema::elements;
use crate::types::ItemKind;
use crate::{HierarchyError, Result};

const KIND_TABLE: &[(&str, ItemKind)] = &[
    (elements::NOTEBOOK, ItemKind::Notebook),
    (elements::SECTION_GROUP, ItemKind::SectionGroup),
    (elements::SECTION, ItemKind::Section),
    (elements::PAGE, ItemKind::Page),
];

/// Item kind for a local element name.
pub fn kind_for_tag(tag: &str) -> Option<ItemKind> {
    KIND_TABLE
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(_, kind)| kind)
}

/// Resolve the kind of a single fragment's root element and check it fits
/// under the caller-supplied parent.
pub(crate) fn resolve_root(tag: &str, parent: Option<ItemKind>) -> Result<ItemKind> {
    let kind = kind_for_tag(tag).ok_or_else(|| HierarchyError::UnsupportedItemKind {
        tag: tag.to_string(),
    })?;

    match parent {
        _ if kind == ItemKind::Notebook => Ok(kind),
        None => Err(HierarchyError::MissingParent { kind }),
        Some(parent) if !kind.can_nest_in(parent) => {
            Err(HierarchyError::InvalidParent { kind, parent })
        }
        Some(_) => Ok(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags() {
        assert_eq!(kind_for_tag("Notebook"), Some(ItemKind::Notebook));
        assert_eq!(kind_for_tag("SectionGroup"), Some(ItemKind::SectionGroup));
        assert_eq!(kind_for_tag("Section"), Some(ItemKind::Section));
        assert_eq!(kind_for_tag("Page"), Some(ItemKind::Page));
        assert_eq!(kind_for_tag("Notebooks"), None);
        assert_eq!(kind_for_tag("section"), None);
    }

    #[test]
    fn unknown_tag_is_reported() {
        match resolve_root("Outline", Some(ItemKind::Section)) {
            Err(HierarchyError::UnsupportedItemKind { tag }) => assert_eq!(tag, "Outline"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parentless_fragment_must_be_a_notebook() {
        assert_eq!(resolve_root("Notebook", None).unwrap(), ItemKind::Notebook);
        assert!(matches!(
            resolve_root("Section", None),
            Err(HierarchyError::MissingParent {
                kind: ItemKind::Section
            })
        ));
    }

    #[test]
    fn parent_kind_is_checked() {
        assert!(resolve_root("Page", Some(ItemKind::Section)).is_ok());
        assert!(matches!(
            resolve_root("Page", Some(ItemKind::Notebook)),
            Err(HierarchyError::InvalidParent { .. })
        ));
        assert!(matches!(
            resolve_root("SectionGroup", Some(ItemKind::Page)),
            Err(HierarchyError::InvalidParent { .. })
        ));
        // A notebook fragment ignores whatever context it is given.
        assert!(resolve_root("Notebook", Some(ItemKind::Page)).is_ok());
    }
}
