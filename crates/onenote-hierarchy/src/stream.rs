// Streaming strategy: one forward-only quick-xml cursor and an explicit stack
// of open notebooks and section groups.
//
// Sections and section groups closing under a container are buffered
// separately and concatenated when the container closes, so children end up
// in the same order the materializing parser produces. A section's pages are
// read eagerly up to the section's end tag.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::{AttrError, Attribute};
use quick_xml::events::{BytesStart, Event};

use crate::builder::Draft;
use crate::decode::decode;
use crate::dispatch::resolve_root;
use crate::schema::elements;
use crate::types::ItemKind;
use crate::{MalformedDocument, Result};

/// A notebook or section group whose end tag has not been read yet.
struct OpenContainer {
    draft: Draft,
    sections: Vec<Draft>,
    groups: Vec<Draft>,
}

impl OpenContainer {
    fn new(draft: Draft) -> Self {
        Self {
            draft,
            sections: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn attach(&mut self, child: Draft) {
        match child.kind() {
            ItemKind::Section => self.sections.push(child),
            _ => self.groups.push(child),
        }
    }

    fn close(self) -> Draft {
        let mut children = self.sections;
        children.extend(self.groups);
        self.draft.with_children(children)
    }
}

pub(crate) struct StreamAssembler<'a> {
    reader: Reader<&'a [u8]>,
    stack: Vec<OpenContainer>,
}

impl<'a> StreamAssembler<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            stack: Vec::new(),
        }
    }

    /// Read a full hierarchy document into one draft per notebook.
    pub fn notebooks(mut self) -> Result<Vec<Draft>> {
        let mut notebooks = Vec::new();
        let (_, root_is_empty) = self.root()?;

        if !root_is_empty {
            loop {
                match self.reader.read_event()? {
                    Event::Start(e) if local_name(&e)? == elements::NOTEBOOK => {
                        let notebook = decode_element(ItemKind::Notebook, &e)?;
                        notebooks.push(self.container(notebook)?);
                    }
                    Event::Empty(e) if local_name(&e)? == elements::NOTEBOOK => {
                        notebooks.push(decode_element(ItemKind::Notebook, &e)?);
                    }
                    Event::Start(e) => self.skip(&e)?,
                    Event::End(_) => break,
                    Event::Eof => return Err(unexpected_eof()),
                    _ => {}
                }
            }
        }

        self.finish()?;
        Ok(notebooks)
    }

    /// Read a single fragment whose root kind is only known from its tag.
    pub fn fragment(mut self, parent: Option<ItemKind>) -> Result<Draft> {
        let (root, root_is_empty) = self.root()?;
        let kind = resolve_root(local_name(&root)?, parent)?;
        let item = decode_element(kind, &root)?;

        let item = match kind {
            _ if root_is_empty => item,
            ItemKind::Notebook | ItemKind::SectionGroup => self.container(item)?,
            ItemKind::Section => self.section(item)?,
            ItemKind::Page => {
                self.skip(&root)?;
                item
            }
        };

        self.finish()?;
        Ok(item)
    }

    /// Assemble an open container up to its end tag.
    fn container(&mut self, draft: Draft) -> Result<Draft> {
        let base = self.stack.len();
        self.stack.push(OpenContainer::new(draft));

        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match local_name(&e)? {
                    elements::SECTION => {
                        let section = decode_element(ItemKind::Section, &e)?;
                        let section = self.section(section)?;
                        self.attach(section);
                    }
                    elements::SECTION_GROUP => {
                        let group = decode_element(ItemKind::SectionGroup, &e)?;
                        self.stack.push(OpenContainer::new(group));
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match local_name(&e)? {
                    elements::SECTION => {
                        let section = decode_element(ItemKind::Section, &e)?;
                        self.attach(section);
                    }
                    elements::SECTION_GROUP => {
                        let group = decode_element(ItemKind::SectionGroup, &e)?;
                        self.attach(group);
                    }
                    _ => {}
                },
                // Everything else is skipped whole, so any end tag closes the
                // innermost open container.
                Event::End(_) => {
                    let Some(open) = self.stack.pop() else {
                        return Err(MalformedDocument::Structure(
                            "unbalanced end tag".to_string(),
                        )
                        .into());
                    };
                    let closed = open.close();
                    if self.stack.len() == base {
                        return Ok(closed);
                    }
                    self.attach(closed);
                }
                Event::Eof => return Err(unexpected_eof()),
                _ => {}
            }
        }
    }

    /// Collect a section's pages up to its end tag.
    fn section(&mut self, section: Draft) -> Result<Draft> {
        let mut pages = Vec::new();

        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    if local_name(&e)? == elements::PAGE {
                        pages.push(decode_element(ItemKind::Page, &e)?);
                    }
                    self.skip(&e)?;
                }
                Event::Empty(e) if local_name(&e)? == elements::PAGE => {
                    pages.push(decode_element(ItemKind::Page, &e)?);
                }
                Event::End(_) => return Ok(section.with_children(pages)),
                Event::Eof => return Err(unexpected_eof()),
                _ => {}
            }
        }
    }

    fn attach(&mut self, child: Draft) {
        if let Some(open) = self.stack.last_mut() {
            open.attach(child);
        }
    }

    /// Skip the rest of an element whose start tag was just read.
    fn skip(&mut self, start: &BytesStart) -> Result<()> {
        self.reader.read_to_end(start.name())?;
        Ok(())
    }

    /// Advance to the root element. Returns it and whether it is self-closing.
    fn root(&mut self) -> Result<(BytesStart<'a>, bool)> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => return Ok((e, false)),
                Event::Empty(e) => return Ok((e, true)),
                Event::Eof => {
                    return Err(MalformedDocument::Structure("no root element".to_string()).into());
                }
                _ => {}
            }
        }
    }

    /// Check that nothing but trailing misc follows the root element.
    fn finish(mut self) -> Result<()> {
        loop {
            match self.reader.read_event()? {
                Event::Eof => return Ok(()),
                Event::Start(_) | Event::Empty(_) | Event::End(_) | Event::Text(_) => {
                    return Err(MalformedDocument::Structure(
                        "unexpected content after the root element".to_string(),
                    )
                    .into());
                }
                _ => {}
            }
        }
    }
}

fn unexpected_eof() -> crate::HierarchyError {
    MalformedDocument::Structure("unexpected end of document".to_string()).into()
}

fn local_name<'e>(e: &'e BytesStart) -> Result<&'e str> {
    Ok(std::str::from_utf8(e.local_name().into_inner())?)
}

fn attribute(attr: std::result::Result<Attribute<'_>, AttrError>) -> Result<(&str, Cow<'_, str>)> {
    let attr = attr?;
    let name = std::str::from_utf8(attr.key.local_name().into_inner())?;
    let value = match attr.value {
        Cow::Borrowed(raw) => normalize(std::str::from_utf8(raw)?)?,
        Cow::Owned(raw) => Cow::Owned(normalize(std::str::from_utf8(&raw)?)?.into_owned()),
    };
    Ok((name, value))
}

/// XML attribute-value normalization: literal tabs and line ends become
/// spaces (a CRLF pair counts once), then references are expanded. Tabs and
/// line ends written as character references survive.
fn normalize(raw: &str) -> Result<Cow<'_, str>> {
    if !raw.contains(['\t', '\r', '\n']) {
        return Ok(unescape(raw)?);
    }
    let spaced = raw.replace("\r\n", " ").replace(['\t', '\r', '\n'], " ");
    Ok(Cow::Owned(unescape(&spaced)?.into_owned()))
}

fn decode_element(kind: ItemKind, e: &BytesStart) -> Result<Draft> {
    decode(kind, e.attributes().map(attribute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HierarchyError;

    fn names(drafts: &[Draft]) -> Vec<&str> {
        drafts.iter().map(|d| d.info.name.as_str()).collect()
    }

    #[test]
    fn interleaved_children_are_grouped_by_kind() {
        let xml = r#"<Notebooks>
  <Notebook name="Work">
    <SectionGroup name="G1"><Section name="G1-S"/></SectionGroup>
    <Section name="S1"><Page name="P1"/><Page name="P2"></Page></Section>
    <SectionGroup name="G2">
      <SectionGroup name="G2-G"><Section name="Deep"/></SectionGroup>
      <Section name="G2-S"/>
    </SectionGroup>
    <Section name="S2"/>
  </Notebook>
  <Notebook name="Home"/>
</Notebooks>"#;

        let notebooks = StreamAssembler::new(xml).notebooks().unwrap();
        assert_eq!(names(&notebooks), ["Work", "Home"]);

        let work = &notebooks[0];
        assert_eq!(names(&work.children), ["S1", "S2", "G1", "G2"]);
        assert_eq!(names(&work.children[0].children), ["P1", "P2"]);
        assert_eq!(names(&work.children[3].children), ["G2-S", "G2-G"]);
        assert_eq!(names(&work.children[3].children[1].children), ["Deep"]);
        assert!(notebooks[1].children.is_empty());
    }

    #[test]
    fn unknown_elements_are_skipped_whole() {
        let xml = r#"<Notebooks>
  <Notebook name="Work">
    <Meta><Section name="Hidden"/><SectionGroup name="AlsoHidden"></SectionGroup></Meta>
    <Section name="Shown"><Page name="P"><Outline><Page name="Nested"/></Outline></Page></Section>
  </Notebook>
</Notebooks>"#;

        let notebooks = StreamAssembler::new(xml).notebooks().unwrap();
        let work = &notebooks[0];
        assert_eq!(names(&work.children), ["Shown"]);
        assert_eq!(names(&work.children[0].children), ["P"]);
    }

    #[test]
    fn empty_root() {
        assert!(StreamAssembler::new("<Notebooks/>").notebooks().unwrap().is_empty());
    }

    #[test]
    fn fragment_section_group() {
        let xml = r#"<SectionGroup name="G"><SectionGroup name="Inner"/><Section name="S"/></SectionGroup>"#;
        let draft = StreamAssembler::new(xml)
            .fragment(Some(ItemKind::Notebook))
            .unwrap();
        assert_eq!(draft.kind(), ItemKind::SectionGroup);
        assert_eq!(names(&draft.children), ["S", "Inner"]);
    }

    #[test]
    fn unclosed_elements_are_malformed() {
        for xml in [
            "<Notebooks><Notebook name=\"A\"><Section name=\"S\">",
            "<Notebooks><Notebook name=\"A\">",
            "<Notebooks>",
            "",
        ] {
            let err = StreamAssembler::new(xml).notebooks().unwrap_err();
            assert!(matches!(err, HierarchyError::MalformedDocument(_)), "{xml:?}: {err:?}");
        }
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let err = StreamAssembler::new("<Notebooks><Notebook></Section></Notebooks>")
            .notebooks()
            .unwrap_err();
        assert!(matches!(err, HierarchyError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn content_after_root_is_malformed() {
        let err = StreamAssembler::new("<Notebooks/><Notebooks/>")
            .notebooks()
            .unwrap_err();
        assert!(matches!(err, HierarchyError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn attribute_whitespace_is_normalized() {
        let xml = "<Notebooks><Notebook name=\"Tab\there\" nickname=\"a\r\nb\rc\nd\" \
                   path=\"x&#9;y&#10;z &amp; more\"/></Notebooks>";
        let notebooks = StreamAssembler::new(xml).notebooks().unwrap();
        let notebook = &notebooks[0];
        assert_eq!(notebook.info.name, "Tab here");
        let crate::types::Details::Notebook(details) = &notebook.details else {
            panic!("expected notebook details, got {:?}", notebook.details);
        };
        assert_eq!(details.nickname, "a b c d");
        assert_eq!(details.path, "x\ty\nz & more");
    }

    #[test]
    fn unsupported_fragment_root() {
        let err = StreamAssembler::new("<Outline/>")
            .fragment(Some(ItemKind::Section))
            .unwrap_err();
        assert!(matches!(err, HierarchyError::UnsupportedItemKind { ref tag } if tag == "Outline"));
    }
}
