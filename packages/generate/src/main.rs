#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for generating birth map view payloads.
//!
//! Each subcommand loads the configured dataset, builds one view and
//! prints it as JSON. `all` writes every view into a directory.

use std::path::PathBuf;

use birth_map_analytics::cache::ViewParams;
use birth_map_analytics_models::Season;
use birth_map_generate::{load_session, summary, write_all, write_choropleth_geojson, write_json};
use birth_map_records_models::Sex;
use birth_map_source::config::DatasetConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "birth_map_generate", about = "Birth map view generator")]
struct Cli {
    /// Dataset configuration file (defaults to the embedded `datasets.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Births per state for one year
    Choropleth {
        /// Year to map (defaults to the configured year)
        #[arg(long)]
        year: Option<i32>,
        /// Emit a `GeoJSON` `FeatureCollection` instead of the view
        #[arg(long)]
        geojson: bool,
    },
    /// Share of each state's births falling in a season
    Seasons {
        #[arg(long)]
        season: Season,
    },
    /// Population totals per state
    Demographics,
    /// Most common names per state for one year
    TopNames {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Most common names overall
    PopularNames {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Yearly counts of a state's most common names
    NameTrend {
        /// Two-letter state abbreviation
        #[arg(long)]
        state: String,
        /// `F` or `M`
        #[arg(long)]
        sex: Sex,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// States present in the name data
    States,
    /// Year range and births color scale
    Summary,
    /// Write every view into a directory
    All {
        #[arg(long)]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DatasetConfig::from_path(path)?,
        None => DatasetConfig::embedded()?,
    };
    let views = config.views;
    let output = cli.output.as_deref();

    let session = load_session(&config).await?;

    let params = match cli.command {
        Commands::Choropleth { year, geojson } => {
            let year = year.unwrap_or(views.default_year);
            if geojson {
                write_choropleth_geojson(&session, year, output)?;
                return Ok(());
            }
            ViewParams::Choropleth { year }
        }
        Commands::Seasons { season } => ViewParams::Seasons { season },
        Commands::Demographics => ViewParams::Demographics,
        Commands::TopNames { year, limit } => ViewParams::TopNames {
            year: year.unwrap_or(views.default_year),
            limit: limit.unwrap_or(views.top_names_per_state),
        },
        Commands::PopularNames { limit } => ViewParams::PopularNames {
            limit: limit.unwrap_or(views.top_names_overall),
        },
        Commands::NameTrend { state, sex, limit } => ViewParams::NameTrend {
            state,
            sex,
            limit: limit.unwrap_or(views.trend_top_names),
        },
        Commands::States => ViewParams::States,
        Commands::Summary => {
            write_json(&summary(&session, &views), output)?;
            return Ok(());
        }
        Commands::All { out_dir } => {
            write_all(&session, &views, &out_dir)?;
            return Ok(());
        }
    };

    write_json(session.view(&params).as_ref(), output)?;

    Ok(())
}
