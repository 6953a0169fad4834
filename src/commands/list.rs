use std::path::Path;

use anyhow::Result;

use zonecheck::loader;
use zonecheck::models::NameTable;

use super::report;

/// Print the timezones grouped by region, then country, then timezone.
/// Codes are annotated with their names when the name tables are supplied.
pub fn list_command(
    timezones: &Path,
    regions: Option<&Path>,
    countries: Option<&Path>,
) -> Result<()> {
    let region_names = match regions {
        Some(path) => match loader::read_region_names(path) {
            Ok(table) => table,
            Err(err) => return Err(report(err)),
        },
        None => NameTable::new(),
    };
    let country_names = match countries {
        Some(path) => match loader::read_country_names(path) {
            Ok(table) => table,
            Err(err) => return Err(report(err)),
        },
        None => NameTable::new(),
    };

    let grouped = match loader::read_membership_grouped(timezones) {
        Ok(grouped) => grouped,
        Err(err) => return Err(report(err)),
    };

    for (region, country_timezones) in &grouped {
        println!("{}", annotate(region, &region_names));
        for (country, timezones) in country_timezones {
            println!("    {}", annotate(country, &country_names));
            let mut timezones: Vec<&String> = timezones.iter().collect();
            timezones.sort();
            for timezone in timezones {
                println!("        {timezone}");
            }
        }
    }

    Ok(())
}

fn annotate(code: &str, names: &NameTable) -> String {
    match names.get(code) {
        Some(name) => format!("{name} ({code})"),
        None => code.to_string(),
    }
}
