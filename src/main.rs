use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};

mod commands;

use commands::{InspectType, inspect_command, list_command, verify_command};
use zonecheck::loader::{LINK_TABLE, LINK_TABLE_ARROW, TableShape};
use zonecheck::models::{DatasetPaths, MembershipSource};

#[derive(Parser)]
#[command(
    name = "zonecheck",
    about = "Referential-integrity checker for timezone database data files",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the cross-references between the data tables
    Verify(VerifyArgs),

    /// Parse a single table and print it as JSON
    Inspect {
        #[arg(value_enum)]
        kind: InspectType,

        /// Path to the table file
        file: PathBuf,

        /// Link table layout
        #[arg(long, value_enum, default_value = "plain")]
        link_format: LinkFormat,
    },

    /// List timezones grouped by region, country, and timezone
    List {
        /// Region-country-timezone file
        timezones: PathBuf,

        /// Region code to name
        #[arg(long)]
        regions: Option<PathBuf>,

        /// Country code to name
        #[arg(long)]
        countries: Option<PathBuf>,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("membership")
        .required(true)
        .args(["region_country_timezones", "country_timezones"])
))]
struct VerifyArgs {
    /// File of zones
    #[arg(long)]
    zones: PathBuf,

    /// File of links
    #[arg(long)]
    links: PathBuf,

    /// File of classified zones
    #[arg(long)]
    classified_zones: PathBuf,

    /// File of classified links
    #[arg(long)]
    classified_links: PathBuf,

    /// Original ISO country table
    #[arg(long)]
    iso_orig: PathBuf,

    /// Long country names
    #[arg(long)]
    iso_long: PathBuf,

    /// Short country names
    #[arg(long)]
    iso_short: PathBuf,

    /// Region names
    #[arg(long)]
    regions: PathBuf,

    /// Region-country-timezone triplets
    #[arg(long, requires = "airport_timezones")]
    region_country_timezones: Option<PathBuf>,

    /// Country-timezone pairs
    #[arg(long)]
    country_timezones: Option<PathBuf>,

    /// Airport to timezones (required with --region-country-timezones)
    #[arg(long, requires = "region_country_timezones")]
    airport_timezones: Option<PathBuf>,

    /// Link table layout
    #[arg(long, value_enum, default_value = "plain")]
    link_format: LinkFormat,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LinkFormat {
    /// `<Tag> <target> <name>`
    Plain,
    /// `<Tag> <name> -> <target>`
    Arrow,
}

impl LinkFormat {
    fn shape(self) -> TableShape {
        match self {
            LinkFormat::Plain => LINK_TABLE,
            LinkFormat::Arrow => LINK_TABLE_ARROW,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Verify(args) => {
            let membership = match (args.region_country_timezones, args.country_timezones) {
                (Some(path), _) => MembershipSource::Triplets(path),
                (None, Some(path)) => MembershipSource::Pairs(path),
                (None, None) => anyhow::bail!(
                    "Must provide one of --region-country-timezones or --country-timezones"
                ),
            };
            let paths = DatasetPaths {
                zones: args.zones,
                links: args.links,
                classified_zones: args.classified_zones,
                classified_links: args.classified_links,
                iso_orig: args.iso_orig,
                iso_long: args.iso_long,
                iso_short: args.iso_short,
                regions: args.regions,
                membership,
                airports: args.airport_timezones,
            };
            verify_command(paths, args.link_format.shape(), args.json)?;
        }
        Commands::Inspect {
            kind,
            file,
            link_format,
        } => {
            inspect_command(kind, &file, link_format.shape())?;
        }
        Commands::List {
            timezones,
            regions,
            countries,
        } => {
            list_command(&timezones, regions.as_deref(), countries.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("zonecheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("zonecheck=info"), // -v: info messages
        _ => EnvFilter::new("zonecheck=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
