// Per-kind attribute tables: local attribute name -> typed setter.
// Attributes missing from a table are ignored; a present value that does not
// convert to its declared type is an error.

use std::borrow::Cow;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::builder::Draft;
use crate::schema::{NO_COLOR, attributes as attr};
use crate::types::*;
use crate::{HierarchyError, Result};

type Setter<T> = fn(&mut T, &'static str, &str) -> Result<()>;

/// Attribute decoding for one item kind.
pub(crate) trait Decode: Default + Into<Details> + 'static {
    const SETTERS: &'static [(&'static str, Setter<Self>)];
}

const INFO_SETTERS: &[(&str, Setter<ItemInfo>)] = &[
    (attr::ID, |info, _, value| {
        info.id = value.to_string();
        Ok(())
    }),
    (attr::NAME, |info, _, value| {
        info.name = value.to_string();
        Ok(())
    }),
    (attr::IS_UNREAD, |info, name, value| {
        info.unread = boolean(name, value)?;
        Ok(())
    }),
    (attr::LAST_MODIFIED_TIME, |info, name, value| {
        info.last_modified = timestamp(name, value)?;
        Ok(())
    }),
];

impl Decode for Notebook {
    const SETTERS: &'static [(&'static str, Setter<Self>)] = &[
        (attr::NICKNAME, |notebook, _, value| {
            notebook.nickname = value.to_string();
            Ok(())
        }),
        (attr::PATH, |notebook, _, value| {
            notebook.path = value.to_string();
            Ok(())
        }),
        (attr::COLOR, |notebook, name, value| {
            notebook.color = color(name, value)?;
            Ok(())
        }),
    ];
}

impl Decode for SectionGroup {
    const SETTERS: &'static [(&'static str, Setter<Self>)] = &[
        (attr::PATH, |group, _, value| {
            group.path = value.to_string();
            Ok(())
        }),
        (attr::IS_RECYCLE_BIN, |group, name, value| {
            group.is_recycle_bin = boolean(name, value)?;
            Ok(())
        }),
    ];
}

impl Decode for Section {
    const SETTERS: &'static [(&'static str, Setter<Self>)] = &[
        (attr::PATH, |section, _, value| {
            section.path = value.to_string();
            Ok(())
        }),
        (attr::COLOR, |section, name, value| {
            section.color = color(name, value)?;
            Ok(())
        }),
        (attr::ENCRYPTED, |section, name, value| {
            section.encrypted = boolean(name, value)?;
            Ok(())
        }),
        (attr::LOCKED, |section, name, value| {
            section.locked = boolean(name, value)?;
            Ok(())
        }),
        (attr::IS_IN_RECYCLE_BIN, |section, name, value| {
            section.is_in_recycle_bin = boolean(name, value)?;
            Ok(())
        }),
        (attr::IS_DELETED_PAGES, |section, name, value| {
            section.is_deleted_pages = boolean(name, value)?;
            Ok(())
        }),
    ];
}

impl Decode for Page {
    const SETTERS: &'static [(&'static str, Setter<Self>)] = &[
        (attr::DATE_TIME, |page, name, value| {
            page.created = timestamp(name, value)?;
            Ok(())
        }),
        (attr::PAGE_LEVEL, |page, name, value| {
            page.level = integer(name, value)?;
            Ok(())
        }),
        (attr::IS_IN_RECYCLE_BIN, |page, name, value| {
            page.is_in_recycle_bin = boolean(name, value)?;
            Ok(())
        }),
    ];
}

fn lookup<T>(table: &[(&'static str, Setter<T>)], name: &str) -> Option<(&'static str, Setter<T>)> {
    table.iter().find(|(key, _)| *key == name).copied()
}

fn decode_as<'a, D, I>(attributes: I) -> Result<Draft>
where
    D: Decode,
    I: IntoIterator<Item = Result<(&'a str, Cow<'a, str>)>>,
{
    let mut info = ItemInfo::default();
    let mut details = D::default();

    for attribute in attributes {
        let (name, value) = attribute?;
        if let Some((key, setter)) = lookup(INFO_SETTERS, name) {
            setter(&mut info, key, &value)?;
        } else if let Some((key, setter)) = lookup(D::SETTERS, name) {
            setter(&mut details, key, &value)?;
        }
    }

    Ok(Draft::new(info, details.into()))
}

/// Decode an element's attributes (by local name) into a childless draft of `kind`.
pub(crate) fn decode<'a, I>(kind: ItemKind, attributes: I) -> Result<Draft>
where
    I: IntoIterator<Item = Result<(&'a str, Cow<'a, str>)>>,
{
    match kind {
        ItemKind::Notebook => decode_as::<Notebook, _>(attributes),
        ItemKind::SectionGroup => decode_as::<SectionGroup, _>(attributes),
        ItemKind::Section => decode_as::<Section, _>(attributes),
        ItemKind::Page => decode_as::<Page, _>(attributes),
    }
}

fn invalid(attribute: &'static str, value: &str) -> HierarchyError {
    HierarchyError::AttributeFormat {
        attribute,
        value: value.to_string(),
    }
}

fn boolean(attribute: &'static str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(attribute, value)),
    }
}

fn integer(attribute: &'static str, value: &str) -> Result<i32> {
    value.parse().map_err(|_| invalid(attribute, value))
}

/// ISO 8601 instant. Values without an offset are taken as UTC.
fn timestamp(attribute: &'static str, value: &str) -> Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .or_else(|_| {
            value
                .parse::<DateTime>()
                .and_then(|civil| civil.to_zoned(TimeZone::UTC))
                .map(|zoned| zoned.timestamp())
        })
        .map_err(|_| invalid(attribute, value))
}

fn color(attribute: &'static str, value: &str) -> Result<Option<Color>> {
    if value == NO_COLOR {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| invalid(attribute, value))
}
