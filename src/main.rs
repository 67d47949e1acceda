//! grid-impact entry point: CLI wiring and config-driven engine run.

mod cli;

use std::process;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use grid_impact::alerts::{AlertAnalysis, AlertWeatherCorrelation};
use grid_impact::config::RunConfig;
use grid_impact::grid::GridInventory;
use grid_impact::impact::ImpactEngine;
use grid_impact::io::export::export_csv;
use grid_impact::weather::{WeatherSeries, WeatherSummary};

use cli::{Cli, OutputFormat};

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {e}");
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Loads config and inputs, prints what was asked for, and optionally serves the API.
fn run(cli: &Cli) -> Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::from_toml_file(path)
            .with_context(|| format!("loading config \"{}\"", path.display()))?,
        None => RunConfig::default(),
    };
    apply_overrides(&mut cfg, cli);

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("{} invalid configuration value(s)", errors.len());
    }

    let inventory = GridInventory::from_json_path(&cfg.inputs.grid)?;
    let (start, end) = (cfg.query.start, cfg.query.end);

    if cli.stats {
        print_output(&inventory.statistics(), cli.format)?;
    }
    if cli.alerts {
        print_output(&AlertAnalysis::analyze(&inventory, start, end), cli.format)?;
    }

    let standalone = cli.stats || cli.alerts || cli.weather_summary || cli.correlation;
    let component = match (cfg.query.kind, cfg.query.id) {
        (Some(kind), Some(id)) => Some(
            inventory
                .component(kind, id)
                .ok_or_else(|| anyhow!("{kind} {id} not found"))?,
        ),
        _ if standalone => None,
        _ => bail!("no component selected: set query.kind and query.id or pass --kind and --id"),
    };

    if component.is_none() && !cli.weather_summary && !cli.correlation {
        return Ok(());
    }

    let series = WeatherSeries::from_csv_path(&cfg.inputs.weather)?;
    let window = series.between(
        start.unwrap_or(NaiveDate::MIN),
        end.unwrap_or(NaiveDate::MAX),
    );

    if cli.weather_summary {
        print_output(&WeatherSummary::from_observations(window), cli.format)?;
    }
    if cli.correlation {
        let analysis = AlertAnalysis::analyze(&inventory, start, end);
        print_output(
            &AlertWeatherCorrelation::correlate(&analysis, window),
            cli.format,
        )?;
    }

    let Some(component) = component else {
        return Ok(());
    };

    let engine = ImpactEngine::new(cfg.impact_params()?);
    let report = engine.assess(&component, window)?;
    info!(
        kind = %report.kind,
        id = report.id,
        days = report.daily.len(),
        "impact report computed"
    );

    print_output(&report, cli.format)?;

    if let Some(path) = &cli.impacts_out {
        export_csv(report.kind, &report.daily, path)
            .with_context(|| format!("failed to write CSV \"{}\"", path.display()))?;
        eprintln!("Impacts written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        serve(report, inventory, series, cli.port).context("API server failed")?;
    }

    Ok(())
}

fn apply_overrides(cfg: &mut RunConfig, cli: &Cli) {
    if let Some(grid) = &cli.grid {
        cfg.inputs.grid = grid.clone();
    }
    if let Some(weather) = &cli.weather {
        cfg.inputs.weather = weather.clone();
    }
    if cli.kind.is_some() {
        cfg.query.kind = cli.kind;
    }
    if cli.id.is_some() {
        cfg.query.id = cli.id;
    }
    if cli.from.is_some() {
        cfg.query.start = cli.from;
    }
    if cli.to.is_some() {
        cfg.query.end = cli.to;
    }
}

/// Prints a text section or its pretty JSON form.
fn print_output<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: std::fmt::Display + serde::Serialize,
{
    match format {
        OutputFormat::Text => print!("{value}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(value).context("serializing output to JSON")?
        ),
    }
    Ok(())
}

#[cfg(feature = "api")]
fn serve(
    report: grid_impact::impact::ImpactReport,
    inventory: GridInventory,
    weather: WeatherSeries,
    port: u16,
) -> std::io::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(grid_impact::api::AppState {
        report,
        inventory,
        weather,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(grid_impact::api::serve(state, addr))
}
