use anyhow::Result;

use zonecheck::loader::{DatasetLoader, TableShape};
use zonecheck::models::{Dataset, DatasetPaths};
use zonecheck::validation::{Summary, Validator};

use super::report;

pub fn verify_command(paths: DatasetPaths, link_shape: TableShape, json: bool) -> Result<()> {
    let loader = DatasetLoader::new(paths, link_shape);
    let dataset = match loader.load_all() {
        Ok(dataset) => dataset,
        Err(err) => return Err(report(err)),
    };

    let summary = match Validator::new(&dataset).verify() {
        Ok(summary) => summary,
        Err(err) => return Err(report(err)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&dataset, &summary);
    }

    Ok(())
}

fn print_summary(dataset: &Dataset, summary: &Summary) {
    let paths = &dataset.paths;

    println!("{}: {}", paths.zones.display(), summary.zones);
    println!("{}: {}", paths.links.display(), summary.links);
    println!(
        "{}: {}",
        paths.classified_zones.display(),
        summary.classified_zones
    );
    println!(
        "{}: {}",
        paths.classified_links.display(),
        summary.classified_links
    );
    println!("{}: {}", paths.iso_orig.display(), summary.countries);
    println!(
        "{}: {}, maxlen: {}",
        paths.iso_short.display(),
        dataset.iso_short.len(),
        summary.max_short_name_len
    );
    println!(
        "{}: {}, maxlen: {}",
        paths.regions.display(),
        summary.regions,
        summary.max_region_name_len
    );

    let stats = &summary.membership;
    match stats.regions {
        Some(regions) => println!(
            "{}: regions={}, countries={}, timezones={}, unique={}",
            paths.membership.path().display(),
            regions,
            stats.countries,
            stats.assignments,
            stats.unique_timezones
        ),
        None => println!(
            "{}: countries={}, timezones={}, unique={}",
            paths.membership.path().display(),
            stats.countries,
            stats.assignments,
            stats.unique_timezones
        ),
    }
    if let Some(airports) = &dataset.airport_timezones {
        if let Some(path) = &paths.airports {
            println!("{}: {}", path.display(), airports.len());
        }
    }

    if !summary.poly_timezones.is_empty() {
        println!("Timezones with multiple countries:");
        for (timezone, countries) in &summary.poly_timezones {
            println!("  {timezone}: {}", countries.join(", "));
        }
    }

    println!("\n✅ All checks passed!");
}
