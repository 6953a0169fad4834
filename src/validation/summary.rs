//! Statistics reported after a fully successful run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::MembershipTable;

#[derive(Debug, Serialize)]
pub struct MembershipStats {
    /// Distinct region codes; absent for the pair-format source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<usize>,
    /// Distinct country codes, pseudo code excluded.
    pub countries: usize,
    /// Total assignment rows.
    pub assignments: usize,
    pub unique_timezones: usize,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub zones: usize,
    pub links: usize,
    pub classified_zones: usize,
    pub classified_links: usize,
    pub countries: usize,
    pub regions: usize,
    pub max_short_name_len: usize,
    pub max_region_name_len: usize,
    pub membership: MembershipStats,
    /// Timezones claimed by more than one country, with the claiming
    /// countries. Legitimate for cities in border disputes; informational,
    /// never a failure.
    pub poly_timezones: BTreeMap<String, Vec<String>>,
}

/// Timezones that appear under more than one country.
pub fn poly_timezones(country_timezones: &MembershipTable) -> BTreeMap<String, Vec<String>> {
    let mut timezone_countries: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (country, timezones) in country_timezones {
        for timezone in timezones {
            let countries = timezone_countries.entry(timezone.clone()).or_default();
            // A country may list the same timezone on several source rows;
            // that is not a multi-country claim.
            if countries.last() != Some(country) {
                countries.push(country.clone());
            }
        }
    }
    timezone_countries
        .into_iter()
        .filter(|(_, countries)| countries.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_timezones_keep_only_multi_country_entries() {
        let mut membership = MembershipTable::new();
        membership.insert(
            "FR".to_string(),
            vec!["Europe/Paris".to_string(), "Europe/Jersey".to_string()],
        );
        membership.insert("JE".to_string(), vec!["Europe/Jersey".to_string()]);

        let poly = poly_timezones(&membership);
        assert_eq!(poly.len(), 1);
        assert_eq!(poly["Europe/Jersey"], vec!["FR", "JE"]);
    }

    #[test]
    fn duplicate_rows_under_one_country_are_not_poly() {
        let mut membership = MembershipTable::new();
        membership.insert(
            "FR".to_string(),
            vec!["Europe/Paris".to_string(), "Europe/Paris".to_string()],
        );
        assert!(poly_timezones(&membership).is_empty());
    }
}
