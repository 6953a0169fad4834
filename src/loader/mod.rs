//! Loaders that parse the line-oriented data tables into typed tables.
//!
//! Parsing is purely per-file; no loader knows about any other table.
//! Cross-table consistency lives in [`crate::validation`].

mod error;
mod lines;
mod shape;

pub use error::{LoadError, ParseError};
pub use shape::{LINK_TABLE, LINK_TABLE_ARROW, TableShape, ZONE_TABLE};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::models::{
    AirportTable, Dataset, DatasetPaths, Entry, EntryTable, MembershipSource, MembershipTable,
    NameTable,
};

use lines::{Line, Token, lines, tokens};

/// Loads the full dataset for one verification run.
pub struct DatasetLoader {
    paths: DatasetPaths,
    link_shape: TableShape,
}

impl DatasetLoader {
    pub fn new(paths: DatasetPaths, link_shape: TableShape) -> Self {
        Self { paths, link_shape }
    }

    /// Read every input file into its table. All reads complete before any
    /// check runs; the returned dataset is never mutated.
    pub fn load_all(&self) -> Result<Dataset, LoadError> {
        let p = &self.paths;

        let zones = read_entry_table(&p.zones, &ZONE_TABLE)?;
        let links = read_entry_table(&p.links, &self.link_shape)?;
        let classified_zones = read_entry_table(&p.classified_zones, &ZONE_TABLE)?;
        let classified_links = read_entry_table(&p.classified_links, &self.link_shape)?;
        debug!(
            "loaded {} zones, {} links, {} classified zones, {} classified links",
            zones.len(),
            links.len(),
            classified_zones.len(),
            classified_links.len()
        );

        let iso_orig = read_country_names(&p.iso_orig)?;
        let iso_long = read_country_names(&p.iso_long)?;
        let iso_short = read_country_names(&p.iso_short)?;
        let regions = read_region_names(&p.regions)?;

        let (country_timezones, region_timezones) = match &p.membership {
            MembershipSource::Pairs(path) => (read_membership_pairs(path)?, None),
            MembershipSource::Triplets(path) => {
                let (countries, regions) = read_membership_triplets(path)?;
                (countries, Some(regions))
            }
        };
        let airport_timezones = match &p.airports {
            Some(path) => Some(read_airport_table(path)?),
            None => None,
        };

        Ok(Dataset {
            paths: self.paths.clone(),
            zones,
            links,
            classified_zones,
            classified_links,
            iso_orig,
            iso_long,
            iso_short,
            regions,
            country_timezones,
            region_timezones,
            airport_timezones,
        })
    }
}

/// Read a zone or link table according to `shape`.
pub fn read_entry_table(path: &Path, shape: &TableShape) -> Result<EntryTable, LoadError> {
    let content = read_file(path)?;
    Ok(parse_entry_table(path, &content, shape)?)
}

/// Read a fixed-width country-name table: the first two characters of each
/// line are the code, the stripped remainder is the name.
pub fn read_country_names(path: &Path) -> Result<NameTable, LoadError> {
    let content = read_file(path)?;
    Ok(parse_country_names(path, &content)?)
}

/// Read a region-name table: the first token is the code, the stripped
/// remainder is the name.
pub fn read_region_names(path: &Path) -> Result<NameTable, LoadError> {
    let content = read_file(path)?;
    Ok(parse_region_names(path, &content)?)
}

/// Read `<country> <timezone>` pairs. Repeated countries accumulate.
pub fn read_membership_pairs(path: &Path) -> Result<MembershipTable, LoadError> {
    let content = read_file(path)?;
    Ok(parse_membership_pairs(path, &content)?)
}

/// Read `<region> <country> <timezone>` triplets into a country table and a
/// region table. Repeated keys accumulate in both.
pub fn read_membership_triplets(
    path: &Path,
) -> Result<(MembershipTable, MembershipTable), LoadError> {
    let content = read_file(path)?;
    Ok(parse_membership_triplets(path, &content)?)
}

/// Read `<region> <country> <timezone>` triplets nested as
/// region -> country -> timezones, for listing.
pub fn read_membership_grouped(
    path: &Path,
) -> Result<BTreeMap<String, MembershipTable>, LoadError> {
    let content = read_file(path)?;
    let mut grouped: BTreeMap<String, MembershipTable> = BTreeMap::new();
    for line in lines(&content) {
        let toks = require_tokens(path, &content, &line, 3)?;
        grouped
            .entry(toks[0].text.to_string())
            .or_default()
            .entry(toks[1].text.to_string())
            .or_default()
            .push(toks[2].text.to_string());
    }
    Ok(grouped)
}

/// Read `<airport> <timezone>` pairs. Airport codes must be unique.
pub fn read_airport_table(path: &Path) -> Result<AirportTable, LoadError> {
    let content = read_file(path)?;
    Ok(parse_airport_table(path, &content)?)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_entry_table(
    path: &Path,
    content: &str,
    shape: &TableShape,
) -> Result<EntryTable, ParseError> {
    let mut table = EntryTable::new();
    for line in lines(content) {
        let toks = tokens(line.text);
        let tag = toks[0];
        let Some(kind) = shape.kind_for(tag.text) else {
            return Err(err_at_token(
                path,
                content,
                &line,
                &tag,
                format!("invalid tag '{}'", tag.text),
            ));
        };
        if toks.len() < shape.min_tokens() {
            return Err(err_at_line(
                path,
                content,
                &line,
                format!(
                    "expected at least {} fields, found {}",
                    shape.min_tokens(),
                    toks.len()
                ),
            ));
        }
        let name = toks[shape.name_col];
        let target = shape.target_col.map(|col| toks[col].text.to_string());
        if table
            .insert(name.text.to_string(), Entry { target, kind })
            .is_some()
        {
            return Err(err_at_token(
                path,
                content,
                &line,
                &name,
                format!("duplicate entry '{}'", name.text),
            ));
        }
    }
    Ok(table)
}

fn parse_country_names(path: &Path, content: &str) -> Result<NameTable, ParseError> {
    let mut table = NameTable::new();
    for line in lines(content) {
        if line.text.len() < 3 || !line.text.is_char_boundary(2) {
            return Err(err_at_line(
                path,
                content,
                &line,
                "expected a two-character code followed by a name".to_string(),
            ));
        }
        let code = &line.text[..2];
        let name = line.text[2..].trim().to_string();
        if table.insert(code.to_string(), name).is_some() {
            return Err(ParseError::new(
                path,
                content,
                (line.offset, 2),
                format!("duplicate country code '{code}'"),
            ));
        }
    }
    Ok(table)
}

fn parse_region_names(path: &Path, content: &str) -> Result<NameTable, ParseError> {
    let mut table = NameTable::new();
    for line in lines(content) {
        let toks = require_tokens(path, content, &line, 2)?;
        let code = toks[0];
        // The name is the rest of the line after the code token, so region
        // names may contain whitespace.
        let name = line.text[code.end()..].trim().to_string();
        if table.insert(code.text.to_string(), name).is_some() {
            return Err(err_at_token(
                path,
                content,
                &line,
                &code,
                format!("duplicate region code '{}'", code.text),
            ));
        }
    }
    Ok(table)
}

fn parse_membership_pairs(path: &Path, content: &str) -> Result<MembershipTable, ParseError> {
    let mut table = MembershipTable::new();
    for line in lines(content) {
        let toks = require_tokens(path, content, &line, 2)?;
        table
            .entry(toks[0].text.to_string())
            .or_default()
            .push(toks[1].text.to_string());
    }
    Ok(table)
}

fn parse_membership_triplets(
    path: &Path,
    content: &str,
) -> Result<(MembershipTable, MembershipTable), ParseError> {
    let mut by_country = MembershipTable::new();
    let mut by_region = MembershipTable::new();
    for line in lines(content) {
        let toks = require_tokens(path, content, &line, 3)?;
        let timezone = toks[2].text;
        by_region
            .entry(toks[0].text.to_string())
            .or_default()
            .push(timezone.to_string());
        by_country
            .entry(toks[1].text.to_string())
            .or_default()
            .push(timezone.to_string());
    }
    Ok((by_country, by_region))
}

fn parse_airport_table(path: &Path, content: &str) -> Result<AirportTable, ParseError> {
    let mut table = AirportTable::new();
    for line in lines(content) {
        let toks = require_tokens(path, content, &line, 2)?;
        let airport = toks[0];
        if table
            .insert(airport.text.to_string(), toks[1].text.to_string())
            .is_some()
        {
            return Err(err_at_token(
                path,
                content,
                &line,
                &airport,
                format!("duplicate airport code '{}'", airport.text),
            ));
        }
    }
    Ok(table)
}

fn require_tokens<'a>(
    path: &Path,
    content: &str,
    line: &Line<'a>,
    count: usize,
) -> Result<Vec<Token<'a>>, ParseError> {
    let toks = tokens(line.text);
    if toks.len() < count {
        return Err(err_at_line(
            path,
            content,
            line,
            format!("expected at least {count} fields, found {}", toks.len()),
        ));
    }
    Ok(toks)
}

fn err_at_token(
    path: &Path,
    content: &str,
    line: &Line<'_>,
    token: &Token<'_>,
    message: String,
) -> ParseError {
    ParseError::new(
        path,
        content,
        (line.offset + token.start, token.text.len()),
        message,
    )
}

fn err_at_line(path: &Path, content: &str, line: &Line<'_>, message: String) -> ParseError {
    ParseError::new(path, content, (line.offset, line.text.len()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("table.txt")
    }

    #[test]
    fn parses_zone_table() {
        let content = "# zones\nZone Europe/Paris\nZoneObsolete America/Santa_Isabel\n";
        let table = parse_entry_table(&p(), content, &ZONE_TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["Europe/Paris"], Entry::zone(EntryKind::Zone));
        assert_eq!(
            table["America/Santa_Isabel"],
            Entry::zone(EntryKind::ZoneObsolete)
        );
    }

    #[test]
    fn parses_link_table_in_iana_column_order() {
        let content = "Link Europe/Paris Europe/Jersey\nSimilar Asia/Tokyo Japan\n";
        let table = parse_entry_table(&p(), content, &LINK_TABLE).unwrap();
        assert_eq!(
            table["Europe/Jersey"],
            Entry::link("Europe/Paris", EntryKind::Link)
        );
        assert_eq!(table["Japan"], Entry::link("Asia/Tokyo", EntryKind::Similar));
    }

    #[test]
    fn parses_arrow_link_variant() {
        let content = "Alias Japan -> Asia/Tokyo\n";
        let table = parse_entry_table(&p(), content, &LINK_TABLE_ARROW).unwrap();
        assert_eq!(table["Japan"], Entry::link("Asia/Tokyo", EntryKind::Alias));
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = parse_entry_table(&p(), "Zonk Europe/Paris\n", &ZONE_TABLE).unwrap_err();
        assert!(err.message.contains("invalid tag 'Zonk'"));
    }

    #[test]
    fn rejects_short_record() {
        let err = parse_entry_table(&p(), "Link Europe/Jersey\n", &LINK_TABLE).unwrap_err();
        assert!(err.message.contains("expected at least 3 fields"));
    }

    #[test]
    fn rejects_duplicate_zone() {
        let err =
            parse_entry_table(&p(), "Zone Europe/Paris\nZone Europe/Paris\n", &ZONE_TABLE)
                .unwrap_err();
        assert!(err.message.contains("duplicate entry 'Europe/Paris'"));
    }

    #[test]
    fn parses_fixed_width_country_names() {
        let content = "FRFrance\nJE Jersey\n";
        let table = parse_country_names(&p(), content).unwrap();
        assert_eq!(table["FR"], "France");
        assert_eq!(table["JE"], "Jersey");
    }

    #[test]
    fn rejects_short_country_line() {
        let err = parse_country_names(&p(), "FR\n").unwrap_err();
        assert!(err.message.contains("two-character code"));
    }

    #[test]
    fn rejects_duplicate_country_code() {
        let err = parse_country_names(&p(), "FRFrance\nFRFrance again\n").unwrap_err();
        assert!(err.message.contains("duplicate country code 'FR'"));
    }

    #[test]
    fn region_names_keep_embedded_whitespace() {
        let content = "NA North America\nEU Europe\n";
        let table = parse_region_names(&p(), content).unwrap();
        assert_eq!(table["NA"], "North America");
        assert_eq!(table["EU"], "Europe");
    }

    #[test]
    fn membership_pairs_accumulate_repeated_keys() {
        let content = "FR Europe/Paris\nFR Europe/Jersey\nMX America/Chihuahua\n";
        let table = parse_membership_pairs(&p(), content).unwrap();
        assert_eq!(table["FR"], vec!["Europe/Paris", "Europe/Jersey"]);
        assert_eq!(table["MX"], vec!["America/Chihuahua"]);
    }

    #[test]
    fn membership_triplets_fill_both_tables() {
        let content = "EU FR Europe/Paris\nEU JE Europe/Jersey\nNA MX America/Chihuahua\n";
        let (by_country, by_region) = parse_membership_triplets(&p(), content).unwrap();
        assert_eq!(by_country["JE"], vec!["Europe/Jersey"]);
        assert_eq!(by_region["EU"], vec!["Europe/Paris", "Europe/Jersey"]);
        assert_eq!(by_region["NA"], vec!["America/Chihuahua"]);
    }

    #[test]
    fn rejects_duplicate_airport_code() {
        let err =
            parse_airport_table(&p(), "CDG Europe/Paris\nCDG Europe/Paris\n").unwrap_err();
        assert!(err.message.contains("duplicate airport code 'CDG'"));
    }
}
