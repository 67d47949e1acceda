//! Runs the `grid-impact` binary against the bundled scenarios.

mod common;

use std::process::{Command, Output};

use common::scenario_path;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grid-impact"))
        .args(args)
        .output()
        .expect("grid-impact process should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn config(name: &str) -> String {
    scenario_path(name).display().to_string()
}

#[test]
fn load_scenario_prints_text_report() {
    let output = run(&["--config", &config("load_heatwave.toml")]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("--- Impact Report ---"));
    assert!(text.contains("load 30 (Downtown LA)"));
    assert!(text.contains("2020-07-01 to 2020-07-07 (7 days)"));
    assert!(text.contains("--- Summary ---"));
    assert!(text.contains("PL_day"));
    assert!(!text.contains("CL_day"));
}

#[test]
fn json_report_is_machine_readable() {
    let output = run(&[
        "--config",
        &config("branch_heatwave.toml"),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["kind"], "branch");
    assert_eq!(json["daily"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["summary"]["CL_day"]["max"], 400.0);
    assert_eq!(json["summary"]["CL_day"]["max_date"], "2020-07-02");
}

#[test]
fn command_line_overrides_config_query() {
    let output = run(&[
        "--config",
        &config("load_heatwave.toml"),
        "--kind",
        "generator",
        "--id",
        "21",
        "--from",
        "2020-07-04",
        "--to",
        "2020-07-04",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(json["name"], "Antelope Solar");
    let day = &json["daily"][0];
    assert_eq!(day["date"], "2020-07-04");
    // 0.6 * (1 - 0.02 * (45 - 35))
    let eff = day["generator_impact"]["Efficiency"].as_f64().unwrap_or(0.0);
    assert!((eff - 0.48).abs() < 1e-12);
}

#[test]
fn custom_wind_curve_from_config() {
    let output = run(&[
        "--config",
        &config("wind_custom_curve.toml"),
        "--from",
        "2020-07-02",
        "--to",
        "2020-07-02",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    // 7.5 m/s on a 2-10 m/s ramp: 90 * 5.5 / 8
    assert_eq!(json["daily"][0]["generator_impact"]["Pgen_day"], 61.875);
}

#[test]
fn impacts_csv_is_written() {
    let out = std::env::temp_dir().join(format!("grid-impact-cli-{}.csv", std::process::id()));
    let output = run(&[
        "--config",
        &config("load_heatwave.toml"),
        "--impacts-out",
        &out.display().to_string(),
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let csv = std::fs::read_to_string(&out).expect("CSV should exist");
    std::fs::remove_file(&out).ok();
    let mut lines = csv.lines();
    assert!(
        lines
            .next()
            .is_some_and(|h| h.starts_with("date,max_temperature") && h.ends_with("PL_day,QL_day"))
    );
    assert_eq!(lines.count(), 7);
}

#[test]
fn unknown_component_exits_with_error() {
    let output = run(&["--config", &config("load_heatwave.toml"), "--id", "999"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("load 999 not found"));
}

#[test]
fn unresolvable_location_exits_with_error() {
    let output = run(&[
        "--config",
        &config("branch_heatwave.toml"),
        "--id",
        "12",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no location can be resolved"));
}

#[test]
fn empty_window_exits_with_error() {
    let output = run(&[
        "--config",
        &config("load_heatwave.toml"),
        "--from",
        "2021-01-01",
        "--to",
        "2021-01-31",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no weather observations"));
}

#[test]
fn reversed_window_fails_validation() {
    let output = run(&[
        "--config",
        &config("load_heatwave.toml"),
        "--from",
        "2020-07-07",
        "--to",
        "2020-07-01",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("query.start"));
}

#[test]
fn stats_and_alerts_without_component() {
    let output = run(&[
        "--grid",
        &config("grid.json"),
        "--stats",
        "--alerts",
        "--from",
        "2020-08-01",
        "--to",
        "2020-12-31",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("--- Grid Statistics ---"));
    assert!(text.contains("Generators:             5"));
    assert!(text.contains("--- Energy Emergency Alerts ---"));
    assert!(text.contains("Total events: 4"));
    assert!(!text.contains("Impact Report"));
}

#[test]
fn missing_component_selection_is_an_error() {
    let output = run(&["--grid", &config("grid.json")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no component selected"));
}

#[test]
fn weather_summary_and_correlation_without_component() {
    let output = run(&[
        "--grid",
        &config("grid.json"),
        "--weather",
        &config("weather.csv"),
        "--weather-summary",
        "--correlation",
        "--from",
        "2020-07-01",
        "--to",
        "2020-07-07",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("--- Weather Summary ---"));
    assert!(text.contains("Period: 2020-07-01 to 2020-07-07 (7 days)"));
    assert!(text.contains("High temperature: 4 day(s)"));
    assert!(text.contains("  2020-07-04 45.0"));
    assert!(text.contains("High wind: 1 day(s)"));
    assert!(text.contains("--- Alert Weather Correlation ---"));
    assert!(text.contains("Alerts with weather:  2"));
    assert!(text.contains("alert days 44.0 °C"));
    assert!(!text.contains("Impact Report"));
}

#[test]
fn weather_summary_json_follows_window() {
    let output = run(&[
        "--config",
        &config("load_heatwave.toml"),
        "--weather-summary",
        "--from",
        "2020-07-06",
        "--to",
        "2020-07-07",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    // summary first, then the load report
    let text = stdout(&output);
    let mut docs = serde_json::Deserializer::from_str(&text).into_iter::<serde_json::Value>();
    let summary = docs
        .next()
        .and_then(Result::ok)
        .expect("weather summary JSON");
    assert_eq!(summary["precipitation_trend"][1]["value"], 6.0);
    assert_eq!(
        summary["extreme_events"]["high_temperature"][0]["date"],
        "2020-07-06"
    );
    let report = docs.next().and_then(Result::ok).expect("report JSON");
    assert_eq!(report["kind"], "load");
}

#[test]
fn missing_config_names_the_file() {
    let output = run(&["--config", "no/such/run.toml"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("loading config"), "{err}");
    assert!(err.contains("no/such/run.toml"), "{err}");
}
