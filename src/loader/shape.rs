//! Configurable parsing specification for zone and link tables.
//!
//! The historical table variants differ only in their tag vocabulary and in
//! which token holds the record name and the link target, so a single shape
//! description covers all of them.

use crate::models::EntryKind;

#[derive(Debug, Clone, Copy)]
pub struct TableShape {
    /// Valid tags and the kind each maps to.
    pub tags: &'static [(&'static str, EntryKind)],
    /// Token index of the record name.
    pub name_col: usize,
    /// Token index of the link target, if this table has targets.
    pub target_col: Option<usize>,
}

impl TableShape {
    pub fn kind_for(&self, tag: &str) -> Option<EntryKind> {
        self.tags.iter().find(|(t, _)| *t == tag).map(|(_, k)| *k)
    }

    /// Number of tokens a record line must have.
    pub fn min_tokens(&self) -> usize {
        self.target_col.map_or(self.name_col, |t| t.max(self.name_col)) + 1
    }
}

const LINK_TAGS: &[(&str, EntryKind)] = &[
    ("Link", EntryKind::Link),
    ("Alias", EntryKind::Alias),
    ("Alternate", EntryKind::Alternate),
    ("Similar", EntryKind::Similar),
    ("Obsolete", EntryKind::Obsolete),
];

/// `Zone <name>` | `ZoneObsolete <name>`.
pub const ZONE_TABLE: TableShape = TableShape {
    tags: &[
        ("Zone", EntryKind::Zone),
        ("ZoneObsolete", EntryKind::ZoneObsolete),
    ],
    name_col: 1,
    target_col: None,
};

/// `<Tag> <target> <name>`, the IANA link column order.
pub const LINK_TABLE: TableShape = TableShape {
    tags: LINK_TAGS,
    name_col: 2,
    target_col: Some(1),
};

/// `<Tag> <name> -> <target>`, the arrow variant used by older table
/// revisions.
pub const LINK_TABLE_ARROW: TableShape = TableShape {
    tags: LINK_TAGS,
    name_col: 1,
    target_col: Some(3),
};
