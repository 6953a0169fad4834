use std::path::Path;

use anyhow::Result;

use zonecheck::loader::{self, TableShape, ZONE_TABLE};

use super::report;

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum InspectType {
    Zones,
    Links,
    Countries,
    Regions,
    Airports,
}

/// Parse a single table and print it as JSON. Useful for debugging one
/// failing file without running the whole check sequence.
pub fn inspect_command(kind: InspectType, file: &Path, link_shape: TableShape) -> Result<()> {
    match kind {
        InspectType::Zones => print_table(loader::read_entry_table(file, &ZONE_TABLE)),
        InspectType::Links => print_table(loader::read_entry_table(file, &link_shape)),
        InspectType::Countries => print_table(loader::read_country_names(file)),
        InspectType::Regions => print_table(loader::read_region_names(file)),
        InspectType::Airports => print_table(loader::read_airport_table(file)),
    }
}

fn print_table<T: serde::Serialize>(table: Result<T, loader::LoadError>) -> Result<()> {
    let table = match table {
        Ok(table) => table,
        Err(err) => return Err(report(err)),
    };
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
