//! Post-hoc min/max summary over a daily impact series.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::types::DailyImpact;
use crate::weather::WeatherField;

/// A summarized numeric field: the nine weather metrics plus the impact fields.
///
/// Ordering follows the declaration, which is also the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "max_temperature")]
    MaxTemperature,
    #[serde(rename = "avg_temperature")]
    AvgTemperature,
    #[serde(rename = "min_temperature")]
    MinTemperature,
    #[serde(rename = "relative_humidity")]
    RelativeHumidity,
    #[serde(rename = "specific_humidity")]
    SpecificHumidity,
    #[serde(rename = "longwave_radiation")]
    LongwaveRadiation,
    #[serde(rename = "shortwave_radiation")]
    ShortwaveRadiation,
    #[serde(rename = "precipitation")]
    Precipitation,
    #[serde(rename = "wind_speed")]
    WindSpeed,
    #[serde(rename = "PL_day")]
    PlDay,
    #[serde(rename = "QL_day")]
    QlDay,
    #[serde(rename = "Pgen_day")]
    PgenDay,
    #[serde(rename = "Qgen_day")]
    QgenDay,
    #[serde(rename = "Efficiency")]
    Efficiency,
    #[serde(rename = "CL_day")]
    ClDay,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Self::MaxTemperature => WeatherField::MaxTemperature.name(),
            Self::AvgTemperature => WeatherField::AvgTemperature.name(),
            Self::MinTemperature => WeatherField::MinTemperature.name(),
            Self::RelativeHumidity => WeatherField::RelativeHumidity.name(),
            Self::SpecificHumidity => WeatherField::SpecificHumidity.name(),
            Self::LongwaveRadiation => WeatherField::LongwaveRadiation.name(),
            Self::ShortwaveRadiation => WeatherField::ShortwaveRadiation.name(),
            Self::Precipitation => WeatherField::Precipitation.name(),
            Self::WindSpeed => WeatherField::WindSpeed.name(),
            Self::PlDay => "PL_day",
            Self::QlDay => "QL_day",
            Self::PgenDay => "Pgen_day",
            Self::QgenDay => "Qgen_day",
            Self::Efficiency => "Efficiency",
            Self::ClDay => "CL_day",
        }
    }
}

impl From<WeatherField> for Metric {
    fn from(field: WeatherField) -> Self {
        match field {
            WeatherField::MaxTemperature => Self::MaxTemperature,
            WeatherField::AvgTemperature => Self::AvgTemperature,
            WeatherField::MinTemperature => Self::MinTemperature,
            WeatherField::RelativeHumidity => Self::RelativeHumidity,
            WeatherField::SpecificHumidity => Self::SpecificHumidity,
            WeatherField::LongwaveRadiation => Self::LongwaveRadiation,
            WeatherField::ShortwaveRadiation => Self::ShortwaveRadiation,
            WeatherField::Precipitation => Self::Precipitation,
            WeatherField::WindSpeed => Self::WindSpeed,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum and maximum of one metric with the date each occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremes {
    pub min: f64,
    pub min_date: NaiveDate,
    pub max: f64,
    pub max_date: NaiveDate,
}

impl Extremes {
    fn new(value: f64, date: NaiveDate) -> Self {
        Self {
            min: value,
            min_date: date,
            max: value,
            max_date: date,
        }
    }

    /// Strict comparisons keep the earliest date on ties.
    fn observe(&mut self, value: f64, date: NaiveDate) {
        if value < self.min {
            self.min = value;
            self.min_date = date;
        }
        if value > self.max {
            self.max = value;
            self.max_date = date;
        }
    }
}

/// Per-metric extremes over one daily impact series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImpactSummary {
    metrics: BTreeMap<Metric, Extremes>,
}

impl ImpactSummary {
    /// Scans the series once in order. NaN values are skipped.
    ///
    /// Returns `None` for an empty series.
    pub fn from_daily(daily: &[DailyImpact]) -> Option<Self> {
        if daily.is_empty() {
            return None;
        }

        let mut metrics: BTreeMap<Metric, Extremes> = BTreeMap::new();
        let mut record = |metric: Metric, value: f64, date: NaiveDate| {
            if value.is_nan() {
                return;
            }
            metrics
                .entry(metric)
                .and_modify(|e| e.observe(value, date))
                .or_insert_with(|| Extremes::new(value, date));
        };

        for day in daily {
            let date = day.date();
            for field in WeatherField::ALL {
                record(field.into(), day.weather.get(field), date);
            }
            if let Some(impact) = &day.impact {
                for (metric, value) in impact.metrics() {
                    record(metric, value, date);
                }
            }
        }

        Some(Self { metrics })
    }

    pub fn get(&self, metric: Metric) -> Option<&Extremes> {
        self.metrics.get(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &Extremes)> {
        self.metrics.iter().map(|(m, e)| (*m, e))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl fmt::Display for ImpactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(
            f,
            "{:<20} {:>12} {:>12} {:>12} {:>12}",
            "metric", "min", "min date", "max", "max date"
        )?;
        for (metric, e) in &self.metrics {
            writeln!(
                f,
                "{:<20} {:>12.3} {:>12} {:>12.3} {:>12}",
                metric.name(),
                e.min,
                e.min_date,
                e.max,
                e.max_date
            )?;
        }
        Ok(())
    }
}
