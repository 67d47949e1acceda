//! Daily weather observations for one location.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::InputError;

/// Weather for one location on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub date: NaiveDate,
    /// °C
    pub max_temperature: f64,
    /// °C
    pub avg_temperature: f64,
    /// °C
    pub min_temperature: f64,
    /// %
    pub relative_humidity: f64,
    /// g/kg
    pub specific_humidity: f64,
    /// W/m²
    pub longwave_radiation: f64,
    /// W/m²
    pub shortwave_radiation: f64,
    /// mm
    pub precipitation: f64,
    /// m/s
    pub wind_speed: f64,
}

impl WeatherObservation {
    pub fn get(&self, field: WeatherField) -> f64 {
        match field {
            WeatherField::MaxTemperature => self.max_temperature,
            WeatherField::AvgTemperature => self.avg_temperature,
            WeatherField::MinTemperature => self.min_temperature,
            WeatherField::RelativeHumidity => self.relative_humidity,
            WeatherField::SpecificHumidity => self.specific_humidity,
            WeatherField::LongwaveRadiation => self.longwave_radiation,
            WeatherField::ShortwaveRadiation => self.shortwave_radiation,
            WeatherField::Precipitation => self.precipitation,
            WeatherField::WindSpeed => self.wind_speed,
        }
    }
}

/// The nine observed weather metrics, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherField {
    MaxTemperature,
    AvgTemperature,
    MinTemperature,
    RelativeHumidity,
    SpecificHumidity,
    LongwaveRadiation,
    ShortwaveRadiation,
    Precipitation,
    WindSpeed,
}

impl WeatherField {
    pub const ALL: [Self; 9] = [
        Self::MaxTemperature,
        Self::AvgTemperature,
        Self::MinTemperature,
        Self::RelativeHumidity,
        Self::SpecificHumidity,
        Self::LongwaveRadiation,
        Self::ShortwaveRadiation,
        Self::Precipitation,
        Self::WindSpeed,
    ];

    /// Column / JSON key name.
    pub fn name(self) -> &'static str {
        match self {
            Self::MaxTemperature => "max_temperature",
            Self::AvgTemperature => "avg_temperature",
            Self::MinTemperature => "min_temperature",
            Self::RelativeHumidity => "relative_humidity",
            Self::SpecificHumidity => "specific_humidity",
            Self::LongwaveRadiation => "longwave_radiation",
            Self::ShortwaveRadiation => "shortwave_radiation",
            Self::Precipitation => "precipitation",
            Self::WindSpeed => "wind_speed",
        }
    }
}

impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Date-ordered observations with at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSeries {
    observations: Vec<WeatherObservation>,
}

impl WeatherSeries {
    /// Builds a series, sorting by date and keeping the first observation of
    /// any duplicated date.
    pub fn new(mut observations: Vec<WeatherObservation>) -> Self {
        // stable sort keeps file order among equal dates
        observations.sort_by_key(|o| o.date);
        let before = observations.len();
        observations.dedup_by_key(|o| o.date);
        if observations.len() < before {
            warn!(
                dropped = before - observations.len(),
                "duplicate weather dates, keeping the first observation of each"
            );
        }
        Self { observations }
    }

    /// Reads a weather CSV file. Columns not named after a weather field are ignored.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if the file cannot be opened or a row fails to parse.
    pub fn from_csv_path(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let series = Self::from_csv_reader(file)?;
        debug!(
            path = %path.display(),
            observations = series.len(),
            "loaded weather series"
        );
        Ok(series)
    }

    /// Reads weather CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if a row is missing a field or holds an invalid value.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, InputError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let observations = rdr
            .deserialize::<WeatherObservation>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(observations))
    }

    /// Observations with `start <= date <= end`. Missing dates are skipped.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[WeatherObservation] {
        let lo = self.observations.partition_point(|o| o.date < start);
        let hi = self.observations.partition_point(|o| o.date <= end);
        if lo >= hi {
            return &[];
        }
        &self.observations[lo..hi]
    }

    pub fn observations(&self) -> &[WeatherObservation] {
        &self.observations
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Max temperature above which a day counts as extreme, °C.
pub const EXTREME_TEMPERATURE: f64 = 35.0;
/// Wind speed above which a day counts as extreme, m/s.
pub const EXTREME_WIND_SPEED: f64 = 15.0;
/// Precipitation above which a day counts as extreme, mm.
pub const EXTREME_PRECIPITATION: f64 = 20.0;
/// Extreme days kept per category.
pub const EXTREME_DAY_LIMIT: usize = 5;

/// One metric on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Most extreme days of a window, strongest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtremeEvents {
    /// `max_temperature` above [`EXTREME_TEMPERATURE`].
    pub high_temperature: Vec<DatedValue>,
    /// `wind_speed` above [`EXTREME_WIND_SPEED`].
    pub high_wind: Vec<DatedValue>,
    /// `precipitation` above [`EXTREME_PRECIPITATION`].
    pub high_precipitation: Vec<DatedValue>,
}

/// Daily trends and extreme days over a window of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherSummary {
    /// `avg_temperature` per day.
    pub temperature_trend: Vec<DatedValue>,
    pub precipitation_trend: Vec<DatedValue>,
    pub wind_speed_trend: Vec<DatedValue>,
    pub extreme_events: ExtremeEvents,
}

impl WeatherSummary {
    /// Summarizes date-ordered observations.
    ///
    /// Extreme lists are sorted by value, descending; equal values keep date
    /// order. NaN values never qualify as extreme.
    pub fn from_observations(observations: &[WeatherObservation]) -> Self {
        let trend = |field: WeatherField| -> Vec<DatedValue> {
            observations
                .iter()
                .map(|o| DatedValue {
                    date: o.date,
                    value: o.get(field),
                })
                .collect()
        };
        Self {
            temperature_trend: trend(WeatherField::AvgTemperature),
            precipitation_trend: trend(WeatherField::Precipitation),
            wind_speed_trend: trend(WeatherField::WindSpeed),
            extreme_events: ExtremeEvents {
                high_temperature: extremes(
                    observations,
                    WeatherField::MaxTemperature,
                    EXTREME_TEMPERATURE,
                ),
                high_wind: extremes(observations, WeatherField::WindSpeed, EXTREME_WIND_SPEED),
                high_precipitation: extremes(
                    observations,
                    WeatherField::Precipitation,
                    EXTREME_PRECIPITATION,
                ),
            },
        }
    }

    pub fn days(&self) -> usize {
        self.temperature_trend.len()
    }
}

fn extremes(
    observations: &[WeatherObservation],
    field: WeatherField,
    threshold: f64,
) -> Vec<DatedValue> {
    let mut days: Vec<DatedValue> = observations
        .iter()
        .map(|o| DatedValue {
            date: o.date,
            value: o.get(field),
        })
        .filter(|d| d.value > threshold)
        .collect();
    // stable: ties stay in date order
    days.sort_by(|a, b| b.value.total_cmp(&a.value));
    days.truncate(EXTREME_DAY_LIMIT);
    days
}

impl fmt::Display for WeatherSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Weather Summary ---")?;
        match (self.temperature_trend.first(), self.temperature_trend.last()) {
            (Some(first), Some(last)) => writeln!(
                f,
                "Period: {} to {} ({} days)",
                first.date,
                last.date,
                self.days()
            )?,
            _ => writeln!(f, "Period: no observations")?,
        }
        writeln!(f, "date       | avg T (°C) | precip (mm) | wind (m/s)")?;
        let rows = self
            .temperature_trend
            .iter()
            .zip(&self.precipitation_trend)
            .zip(&self.wind_speed_trend);
        for ((t, p), w) in rows {
            writeln!(
                f,
                "{} | {:>10.1} | {:>11.1} | {:>10.1}",
                t.date, t.value, p.value, w.value
            )?;
        }
        let sections = [
            ("High temperature", &self.extreme_events.high_temperature),
            ("High wind", &self.extreme_events.high_wind),
            ("High precipitation", &self.extreme_events.high_precipitation),
        ];
        for (title, days) in sections {
            writeln!(f, "{title}: {} day(s)", days.len())?;
            for d in days {
                writeln!(f, "  {} {:.1}", d.date, d.value)?;
            }
        }
        Ok(())
    }
}
