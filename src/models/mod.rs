//! Typed in-memory representation of the data tables.
//!
//! All tables are built once by the loader and are read-only for the rest of
//! the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Tag carried by every zone or link record. The kind decides which
/// publication checks apply to the record and never changes after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Zone,
    ZoneObsolete,
    Link,
    Alias,
    Alternate,
    Similar,
    Obsolete,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Zone => "Zone",
            EntryKind::ZoneObsolete => "ZoneObsolete",
            EntryKind::Link => "Link",
            EntryKind::Alias => "Alias",
            EntryKind::Alternate => "Alternate",
            EntryKind::Similar => "Similar",
            EntryKind::Obsolete => "Obsolete",
        }
    }
}

/// One record in a zone or link table. Zone records resolve to nothing;
/// link records resolve to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub target: Option<String>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn zone(kind: EntryKind) -> Self {
        Self { target: None, kind }
    }

    pub fn link(target: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            target: Some(target.into()),
            kind,
        }
    }
}

/// Zone and link tables, keyed by identifier.
pub type EntryTable = BTreeMap<String, Entry>;

/// Country and region name tables, keyed by code.
pub type NameTable = BTreeMap<String, String>;

/// Country or region code to the timezones assigned to it. Repeated keys
/// accumulate; the same timezone may recur under different keys.
pub type MembershipTable = BTreeMap<String, Vec<String>>;

/// Airport code to timezone. Keys are unique.
pub type AirportTable = BTreeMap<String, String>;

/// Where the country/timezone assignments come from.
#[derive(Debug, Clone)]
pub enum MembershipSource {
    /// `<country> <timezone>` pairs.
    Pairs(PathBuf),
    /// `<region> <country> <timezone>` triplets.
    Triplets(PathBuf),
}

impl MembershipSource {
    pub fn path(&self) -> &Path {
        match self {
            MembershipSource::Pairs(path) | MembershipSource::Triplets(path) => path,
        }
    }
}

/// The input files for one verification run.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub zones: PathBuf,
    pub links: PathBuf,
    pub classified_zones: PathBuf,
    pub classified_links: PathBuf,
    pub iso_orig: PathBuf,
    pub iso_long: PathBuf,
    pub iso_short: PathBuf,
    pub regions: PathBuf,
    pub membership: MembershipSource,
    pub airports: Option<PathBuf>,
}

/// The fully loaded dataset for one verification run.
#[derive(Debug)]
pub struct Dataset {
    pub paths: DatasetPaths,
    pub zones: EntryTable,
    pub links: EntryTable,
    pub classified_zones: EntryTable,
    pub classified_links: EntryTable,
    pub iso_orig: NameTable,
    pub iso_long: NameTable,
    pub iso_short: NameTable,
    pub regions: NameTable,
    pub country_timezones: MembershipTable,
    /// Present only when the membership source carries a region dimension.
    pub region_timezones: Option<MembershipTable>,
    /// Present only when an airport table was supplied.
    pub airport_timezones: Option<AirportTable>,
}
