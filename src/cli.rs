use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use grid_impact::grid::ComponentKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run configuration (TOML); command-line values override it
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Grid inventory JSON, overriding `inputs.grid`
    #[arg(long)]
    pub grid: Option<PathBuf>,

    /// Weather CSV, overriding `inputs.weather`
    #[arg(long)]
    pub weather: Option<PathBuf>,

    /// Component kind to assess
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<ComponentKind>,

    /// Component identifier
    #[arg(long)]
    pub id: Option<i64>,

    /// First day of the window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Write the daily impacts to a CSV file
    #[arg(long)]
    pub impacts_out: Option<PathBuf>,

    /// Output format for reports printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print grid statistics
    #[arg(long)]
    pub stats: bool,

    /// Print the energy emergency alert analysis for the window
    #[arg(long)]
    pub alerts: bool,

    /// Print daily weather trends and extreme days for the window
    #[arg(long)]
    pub weather_summary: bool,

    /// Compare weather on alert days with the whole window
    #[arg(long)]
    pub correlation: bool,

    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    /// Start the REST API after computing the report
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_kind(s: &str) -> Result<ComponentKind, String> {
    s.parse()
}
