// Names and tokens of the OneNote 2013 hierarchy schema.
// Elements and attributes are matched by local name only.

pub const NAMESPACE_URI: &str = "http://schemas.microsoft.com/office/onenote/2013/onenote";

/// Separator between ancestor names in [`Item::relative_path`](crate::Item::relative_path).
///
/// Names are not escaped, so a name that itself contains the separator
/// cannot be recovered by splitting the path.
pub const RELATIVE_PATH_SEPARATOR: char = '\\';

/// Attribute value meaning "no color".
pub const NO_COLOR: &str = "none";

pub mod elements {
    pub const NOTEBOOKS: &str = "Notebooks";
    pub const NOTEBOOK: &str = "Notebook";
    pub const SECTION_GROUP: &str = "SectionGroup";
    pub const SECTION: &str = "Section";
    pub const PAGE: &str = "Page";
}

pub mod attributes {
    pub const ID: &str = "ID";
    pub const NAME: &str = "name";
    pub const IS_UNREAD: &str = "isUnread";
    pub const LAST_MODIFIED_TIME: &str = "lastModifiedTime";

    pub const NICKNAME: &str = "nickname";
    pub const PATH: &str = "path";
    pub const COLOR: &str = "color";

    pub const IS_RECYCLE_BIN: &str = "isRecycleBin";

    pub const ENCRYPTED: &str = "encrypted";
    pub const LOCKED: &str = "locked";
    pub const IS_IN_RECYCLE_BIN: &str = "isInRecycleBin";
    pub const IS_DELETED_PAGES: &str = "isDeletedPages";

    pub const DATE_TIME: &str = "dateTime";
    pub const PAGE_LEVEL: &str = "pageLevel";
}

/// Compose a relative path from ancestor names, outermost first.
pub(crate) fn join_relative_path<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut path = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 {
            path.push(RELATIVE_PATH_SEPARATOR);
        }
        path.push_str(name);
    }
    path
}

/// Split a relative path back into its component names.
///
/// Only exact for names free of [`RELATIVE_PATH_SEPARATOR`].
pub fn split_relative_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(RELATIVE_PATH_SEPARATOR)
}
