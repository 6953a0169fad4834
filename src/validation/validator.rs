use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, info};

use crate::graph::AliasGraph;
use crate::models::{Dataset, EntryKind, EntryTable};

use super::error::{CheckError, IdList};
use super::reconciler::{reconcile, reconcile_excluding};
use super::summary::{MembershipStats, Summary, poly_timezones};

/// ISO territories that legitimately have no timezone (uninhabited).
pub const UNINHABITED_COUNTRIES: &[&str] = &["BV", "HM"];

/// Reserved code for timezones bound to no territory (UTC and friends).
pub const PSEUDO_CODE: &str = "00";

/// Display ceiling for short country names.
pub const MAX_SHORT_NAME_LEN: usize = 13;

/// Runs the check sequence over a loaded dataset, in dependency order.
/// Each check consumes the fully materialized output of earlier ones, so
/// the first violated invariant aborts the run.
pub struct Validator<'a> {
    data: &'a Dataset,
}

impl<'a> Validator<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }

    pub fn verify(&self) -> Result<Summary, CheckError> {
        let paths = &self.data.paths;

        debug!("checking zones against classified zones");
        self.check_zones()?;

        debug!("checking link tables for cycles");
        self.check_cycles(&paths.links, &self.data.links)?;
        self.check_cycles(&paths.classified_links, &self.data.classified_links)?;

        debug!("checking links against classified links");
        self.check_links()?;
        self.check_link_targets()?;

        debug!("checking ISO country name tables");
        self.check_iso_names()?;

        debug!("checking membership countries");
        self.check_countries()?;
        self.check_regions()?;

        debug!("checking membership timezones");
        self.check_timezones()?;
        self.check_airports()?;

        info!("✓ all checks passed");
        Ok(self.summarize())
    }

    /// Classification only annotates: the classified zone table must carry
    /// exactly the identifiers of the canonical one.
    fn check_zones(&self) -> Result<(), CheckError> {
        let file = display(&self.data.paths.classified_zones);
        let diff = reconcile(&keys(&self.data.zones), &keys(&self.data.classified_zones));
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra zones in {file}"),
                diff.extra,
            ));
        }
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing zones in {file}"),
                diff.missing,
            ));
        }
        Ok(())
    }

    fn check_cycles(&self, file: &Path, table: &EntryTable) -> Result<(), CheckError> {
        let graph = AliasGraph::new(table);
        if let Some((name, target)) = graph.first_cycle() {
            return Err(CheckError::Cycle {
                file: display(file),
                name,
                target,
            });
        }
        Ok(())
    }

    fn check_links(&self) -> Result<(), CheckError> {
        let file = display(&self.data.paths.classified_links);
        let diff = reconcile(&keys(&self.data.links), &keys(&self.data.classified_links));
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra links in {file}"),
                diff.extra,
            ));
        }
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing links in {file}"),
                diff.missing,
            ));
        }
        Ok(())
    }

    /// Every classified link must resolve to a known link or zone. This
    /// catches typos in hand-maintained target columns.
    fn check_link_targets(&self) -> Result<(), CheckError> {
        let mut bad = Vec::new();
        for (name, entry) in &self.data.classified_links {
            if let Some(target) = &entry.target {
                if !self.data.links.contains_key(target)
                    && !self.data.zones.contains_key(target)
                {
                    bad.push(format!("'{name}' -> '{target}'"));
                }
            }
        }
        if !bad.is_empty() {
            return Err(CheckError::InvalidLinkTargets {
                file: display(&self.data.paths.classified_links),
                items: IdList::new(bad),
            });
        }
        Ok(())
    }

    /// The long- and short-form name tables must both cover the original
    /// ISO codes plus the pseudo code, and short names must fit the display
    /// ceiling.
    fn check_iso_names(&self) -> Result<(), CheckError> {
        let mut expected = keys(&self.data.iso_orig);
        expected.insert(PSEUDO_CODE);

        let tables = [
            (&self.data.paths.iso_long, &self.data.iso_long),
            (&self.data.paths.iso_short, &self.data.iso_short),
        ];
        for (path, table) in tables {
            let file = display(path);
            let diff = reconcile(&expected, &keys(table));
            if !diff.missing.is_empty() {
                return Err(CheckError::set_mismatch(
                    format!("Missing countries in {file}"),
                    diff.missing,
                ));
            }
            if !diff.extra.is_empty() {
                return Err(CheckError::set_mismatch(
                    format!("Extra countries in {file}"),
                    diff.extra,
                ));
            }
        }

        let over: Vec<String> = self
            .data
            .iso_short
            .iter()
            .filter(|(_, name)| name.chars().count() > MAX_SHORT_NAME_LEN)
            .map(|(code, _)| code.clone())
            .collect();
        if !over.is_empty() {
            let len = self
                .data
                .iso_short
                .values()
                .map(|name| name.chars().count())
                .max()
                .unwrap_or(0);
            return Err(CheckError::NameTooLong {
                len,
                max: MAX_SHORT_NAME_LEN,
                items: IdList::new(over),
            });
        }
        Ok(())
    }

    /// Every inhabited ISO country must claim at least one timezone, and
    /// every claiming country must be a real ISO country.
    fn check_countries(&self) -> Result<(), CheckError> {
        let file = display(self.data.paths.membership.path());
        let mut exclusions: Vec<&str> = UNINHABITED_COUNTRIES.to_vec();
        exclusions.push(PSEUDO_CODE);

        let diff = reconcile_excluding(
            &keys(&self.data.iso_short),
            &keys(&self.data.country_timezones),
            &exclusions,
        );
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing countries in {file}"),
                diff.missing,
            ));
        }
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra countries in {file}"),
                diff.extra,
            ));
        }
        Ok(())
    }

    /// With the triplet source, the membership regions must match the
    /// region-name table exactly.
    fn check_regions(&self) -> Result<(), CheckError> {
        let Some(region_timezones) = &self.data.region_timezones else {
            return Ok(());
        };
        let file = display(self.data.paths.membership.path());
        let diff = reconcile(&keys(&self.data.regions), &keys(region_timezones));
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra regions in {file}"),
                diff.extra,
            ));
        }
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing regions in {file}"),
                diff.missing,
            ));
        }
        Ok(())
    }

    /// Only identifiers classified `Zone`, `Similar`, or `Alternate` may be
    /// assigned to countries. `Alias` and `Obsolete` entries would publish
    /// duplicate or stale rows.
    fn check_timezones(&self) -> Result<(), CheckError> {
        let file = display(self.data.paths.membership.path());

        let mut expected: BTreeSet<&str> = self
            .data
            .classified_zones
            .iter()
            .filter(|(_, entry)| entry.kind == EntryKind::Zone)
            .map(|(name, _)| name.as_str())
            .collect();
        expected.extend(
            self.data
                .classified_links
                .iter()
                .filter(|(_, entry)| {
                    matches!(entry.kind, EntryKind::Similar | EntryKind::Alternate)
                })
                .map(|(name, _)| name.as_str()),
        );

        let observed: BTreeSet<&str> = self
            .data
            .country_timezones
            .values()
            .flatten()
            .map(String::as_str)
            .collect();

        let diff = reconcile(&expected, &observed);
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra timezones in {file}"),
                diff.extra,
            ));
        }
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing timezones from {file}"),
                diff.missing,
            ));
        }
        Ok(())
    }

    /// The airport table must cover exactly the timezones the membership
    /// table assigns.
    fn check_airports(&self) -> Result<(), CheckError> {
        let Some(airports) = &self.data.airport_timezones else {
            return Ok(());
        };
        let file = self
            .data
            .paths
            .airports
            .as_deref()
            .map(display)
            .unwrap_or_default();

        let expected: BTreeSet<&str> = self
            .data
            .country_timezones
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        let observed: BTreeSet<&str> = airports.values().map(String::as_str).collect();

        let diff = reconcile(&expected, &observed);
        if !diff.missing.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Missing timezones in {file}"),
                diff.missing,
            ));
        }
        if !diff.extra.is_empty() {
            return Err(CheckError::set_mismatch(
                format!("Extra timezones in {file}"),
                diff.extra,
            ));
        }
        Ok(())
    }

    fn summarize(&self) -> Summary {
        let data = self.data;
        let assignments: usize = data.country_timezones.values().map(Vec::len).sum();
        let unique_timezones = data
            .country_timezones
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len();
        let countries = data
            .country_timezones
            .keys()
            .filter(|code| code.as_str() != PSEUDO_CODE)
            .count();

        Summary {
            zones: data.zones.len(),
            links: data.links.len(),
            classified_zones: data.classified_zones.len(),
            classified_links: data.classified_links.len(),
            countries: data.iso_orig.len(),
            regions: data.regions.len(),
            max_short_name_len: max_name_len(data.iso_short.values()),
            max_region_name_len: max_name_len(data.regions.values()),
            membership: MembershipStats {
                regions: data.region_timezones.as_ref().map(BTreeMap::len),
                countries,
                assignments,
                unique_timezones,
            },
            poly_timezones: poly_timezones(&data.country_timezones),
        }
    }
}

fn keys<V>(table: &BTreeMap<String, V>) -> BTreeSet<&str> {
    table.keys().map(String::as_str).collect()
}

fn max_name_len<'a>(names: impl Iterator<Item = &'a String>) -> usize {
    names.map(|name| name.chars().count()).max().unwrap_or(0)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
