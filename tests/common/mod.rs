//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use grid_impact::grid::{
    Branch, GenerationTechnology, Generator, Geometry, GridComponent, GridInventory, Load, LonLat,
};
use grid_impact::weather::{WeatherObservation, WeatherSeries};

/// Path to a file under `scenarios/`.
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

/// The scenario grid (3 buses, 3 branches, 5 generators, 2 loads, 1 substation).
pub fn scenario_grid() -> GridInventory {
    GridInventory::from_json_path(&scenario_path("grid.json")).expect("scenario grid should load")
}

/// The scenario weather, 2020-07-01 through 2020-07-07.
pub fn scenario_weather() -> WeatherSeries {
    WeatherSeries::from_csv_path(&scenario_path("weather.csv"))
        .expect("scenario weather should load")
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, month, day).expect("valid date")
}

/// A July 2020 observation with the given max temperature and wind speed.
///
/// Other fields are fixed so that only the two varied inputs drive impacts.
pub fn observation(day: u32, max_temperature: f64, wind_speed: f64) -> WeatherObservation {
    WeatherObservation {
        date: date(7, day),
        max_temperature,
        avg_temperature: 25.0,
        min_temperature: 18.0,
        relative_humidity: 30.0,
        specific_humidity: 7.0,
        longwave_radiation: 340.0,
        shortwave_radiation: 850.0,
        precipitation: 0.0,
        wind_speed,
    }
}

/// Consecutive July observations starting on the 1st, one per max temperature.
pub fn series(max_temperatures: &[f64]) -> Vec<WeatherObservation> {
    max_temperatures
        .iter()
        .zip(1..)
        .map(|(&t, day)| observation(day, t, 5.0))
        .collect()
}

pub fn point(longitude: f64, latitude: f64) -> Geometry {
    Geometry::Point {
        coordinates: LonLat::new(longitude, latitude),
    }
}

pub fn load(p_load: f64, q_load: f64) -> GridComponent {
    GridComponent::Load(Load {
        id: 100,
        name: "Test load".into(),
        bus_id: None,
        p_load,
        q_load,
        geometry: point(-118.25, 34.05),
    })
}

pub fn generator(tag: &str, p_gen: f64, q_gen: f64) -> GridComponent {
    GridComponent::Generator(Generator {
        id: 200,
        name: format!("Test {tag}"),
        bus_id: None,
        p_gen,
        q_gen,
        p_max: Some(p_gen),
        p_min: None,
        q_max: None,
        q_min: None,
        gen_type: Some(GenerationTechnology::from(tag.to_string())),
        geometry: point(-118.3, 34.7),
    })
}

pub fn branch(rate1: f64) -> GridComponent {
    GridComponent::Branch(Branch {
        id: 300,
        name: "Test line".into(),
        from_bus_id: None,
        to_bus_id: None,
        rate1,
        rate2: None,
        rate3: None,
        in_service: true,
        geometry: Geometry::LineString {
            coordinates: vec![LonLat::new(-118.5, 34.3), LonLat::new(-118.1, 34.5)],
        },
    })
}
