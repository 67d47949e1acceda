//! Balancing authorities and Energy Emergency Alert (EEA) analysis.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::{Geometry, GridInventory, LonLat};
use crate::weather::WeatherObservation;

/// Relative difference, in percent, above which a metric is called correlated.
pub const CORRELATION_THRESHOLD_PERCENT: f64 = 10.0;

/// An operational control area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancingAuthority {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub geometry: Geometry,
}

/// A declared grid-stress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEmergencyAlert {
    pub id: i64,
    pub ba_id: i64,
    pub date: NaiveDate,
    /// Severity, 1 through 3.
    pub level: u8,
    #[serde(default)]
    pub description: String,
}

/// An alert joined with its balancing authority.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEvent {
    pub id: i64,
    pub date: NaiveDate,
    pub level: u8,
    pub description: String,
    pub ba_name: String,
    pub ba_abbreviation: String,
    /// Representative point of the authority's territory, if resolvable.
    pub ba_location: Option<LonLat>,
}

/// Aggregate counts over the selected events.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCounts {
    pub total_events: usize,
    /// Keys 1, 2 and 3 are always present.
    pub by_level: BTreeMap<u8, usize>,
    pub by_ba: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, usize>,
}

/// Alert events in a date window plus their summary.
#[derive(Debug, Clone, Serialize)]
pub struct AlertAnalysis {
    pub events: Vec<AlertEvent>,
    pub summary: AlertCounts,
}

impl AlertAnalysis {
    /// Joins alerts with their authorities and counts them.
    ///
    /// Both bounds are inclusive and optional. Alerts referencing an unknown
    /// authority are dropped.
    pub fn analyze(
        inventory: &GridInventory,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        let events: Vec<AlertEvent> = inventory
            .alerts
            .iter()
            .filter(|a| start.is_none_or(|s| a.date >= s) && end.is_none_or(|e| a.date <= e))
            .filter_map(|a| {
                let ba = inventory
                    .balancing_authorities
                    .iter()
                    .find(|ba| ba.id == a.ba_id)?;
                Some(AlertEvent {
                    id: a.id,
                    date: a.date,
                    level: a.level,
                    description: a.description.clone(),
                    ba_name: ba.name.clone(),
                    ba_abbreviation: ba.abbreviation.clone(),
                    ba_location: ba.geometry.representative_point(),
                })
            })
            .collect();

        let mut by_level: BTreeMap<u8, usize> = (1..=3).map(|l| (l, 0)).collect();
        let mut by_ba = BTreeMap::new();
        let mut by_month = BTreeMap::new();
        for event in &events {
            if let Some(count) = by_level.get_mut(&event.level) {
                *count += 1;
            }
            *by_ba.entry(event.ba_abbreviation.clone()).or_insert(0) += 1;
            *by_month
                .entry(event.date.format("%Y-%m").to_string())
                .or_insert(0) += 1;
        }

        Self {
            summary: AlertCounts {
                total_events: events.len(),
                by_level,
                by_ba,
                by_month,
            },
            events,
        }
    }
}

impl fmt::Display for AlertAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Emergency Alerts ---")?;
        for e in &self.events {
            writeln!(
                f,
                "{} | EEA{} | {:<6} | {}",
                e.date, e.level, e.ba_abbreviation, e.description
            )?;
        }
        let s = &self.summary;
        writeln!(f, "Total events: {}", s.total_events)?;
        for (level, count) in &s.by_level {
            writeln!(f, "  level {level}: {count}")?;
        }
        for (ba, count) in &s.by_ba {
            writeln!(f, "  {ba}: {count}")?;
        }
        for (month, count) in &s.by_month {
            writeln!(f, "  {month}: {count}")?;
        }
        Ok(())
    }
}

/// Mean weather over a set of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeatherConditions {
    pub avg_max_temperature: f64,
    pub avg_wind_speed: f64,
    pub avg_precipitation: f64,
}

impl WeatherConditions {
    /// Means over `days`; all zero when `days` is empty.
    fn mean_of<'a>(days: impl IntoIterator<Item = &'a WeatherObservation>) -> Self {
        let mut sum = Self::default();
        let mut n = 0_usize;
        for o in days {
            sum.avg_max_temperature += o.max_temperature;
            sum.avg_wind_speed += o.wind_speed;
            sum.avg_precipitation += o.precipitation;
            n += 1;
        }
        if n == 0 {
            return sum;
        }
        let n = n as f64;
        Self {
            avg_max_temperature: sum.avg_max_temperature / n,
            avg_wind_speed: sum.avg_wind_speed / n,
            avg_precipitation: sum.avg_precipitation / n,
        }
    }
}

/// Per-metric difference of alert days against all days, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeatherDifference {
    pub max_temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
}

/// How strongly a metric moves with alert days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    High,
    Low,
}

impl CorrelationStrength {
    fn from_percent(diff: f64) -> Self {
        if diff.abs() > CORRELATION_THRESHOLD_PERCENT {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Low => "Low",
        })
    }
}

/// An alert and the weather observed on its date.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelatedAlert {
    pub eea_event: AlertEvent,
    pub weather_data: WeatherConditions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationSummary {
    /// Means over the alerts that have weather on their date.
    pub eea_days_weather: WeatherConditions,
    /// Means over every observation in the window.
    pub all_days_weather: WeatherConditions,
    pub percentage_difference: WeatherDifference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrelationConclusion {
    pub temperature_correlation: CorrelationStrength,
    pub wind_correlation: CorrelationStrength,
    pub precipitation_correlation: CorrelationStrength,
}

/// Weather on alert days compared with the window as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct AlertWeatherCorrelation {
    pub correlation_data: Vec<CorrelatedAlert>,
    pub summary: CorrelationSummary,
    pub conclusion: CorrelationConclusion,
}

impl AlertWeatherCorrelation {
    /// Pairs each analyzed alert with the observation on its date.
    ///
    /// `weather` is the date-ordered window the alerts were selected for.
    /// Alerts on a date without an observation are left out. An alert day is
    /// counted once per alert, so two alerts on one day weigh that day twice.
    pub fn correlate(analysis: &AlertAnalysis, weather: &[WeatherObservation]) -> Self {
        let on_date = |date: NaiveDate| {
            weather
                .binary_search_by_key(&date, |o| o.date)
                .ok()
                .map(|i| &weather[i])
        };

        let mut alert_days = Vec::new();
        let mut correlation_data = Vec::new();
        for event in &analysis.events {
            let Some(obs) = on_date(event.date) else {
                continue;
            };
            alert_days.push(obs);
            correlation_data.push(CorrelatedAlert {
                eea_event: event.clone(),
                weather_data: WeatherConditions::mean_of([obs]),
            });
        }

        let eea = WeatherConditions::mean_of(alert_days);
        let all = WeatherConditions::mean_of(weather);
        let diff = WeatherDifference {
            max_temperature: percent_difference(eea.avg_max_temperature, all.avg_max_temperature),
            wind_speed: percent_difference(eea.avg_wind_speed, all.avg_wind_speed),
            precipitation: percent_difference(eea.avg_precipitation, all.avg_precipitation),
        };

        Self {
            correlation_data,
            summary: CorrelationSummary {
                eea_days_weather: eea,
                all_days_weather: all,
                percentage_difference: diff,
            },
            conclusion: CorrelationConclusion {
                temperature_correlation: CorrelationStrength::from_percent(diff.max_temperature),
                wind_correlation: CorrelationStrength::from_percent(diff.wind_speed),
                precipitation_correlation: CorrelationStrength::from_percent(diff.precipitation),
            },
        }
    }
}

/// `(value - baseline) / baseline` in percent, 0 for a zero baseline.
fn percent_difference(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        (value - baseline) / baseline * 100.0
    }
}

impl fmt::Display for AlertWeatherCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Alert Weather Correlation ---")?;
        for c in &self.correlation_data {
            let w = &c.weather_data;
            writeln!(
                f,
                "{} | EEA{} | {:<6} | {:.1} °C, {:.1} m/s, {:.1} mm",
                c.eea_event.date,
                c.eea_event.level,
                c.eea_event.ba_abbreviation,
                w.avg_max_temperature,
                w.avg_wind_speed,
                w.avg_precipitation
            )?;
        }
        let s = &self.summary;
        let d = &s.percentage_difference;
        let c = &self.conclusion;
        writeln!(f, "Alerts with weather:  {}", self.correlation_data.len())?;
        writeln!(
            f,
            "Max temperature:  alert days {:.1} °C, all days {:.1} °C ({:+.1}%, {})",
            s.eea_days_weather.avg_max_temperature,
            s.all_days_weather.avg_max_temperature,
            d.max_temperature,
            c.temperature_correlation
        )?;
        writeln!(
            f,
            "Wind speed:       alert days {:.1} m/s, all days {:.1} m/s ({:+.1}%, {})",
            s.eea_days_weather.avg_wind_speed,
            s.all_days_weather.avg_wind_speed,
            d.wind_speed,
            c.wind_correlation
        )?;
        writeln!(
            f,
            "Precipitation:    alert days {:.1} mm, all days {:.1} mm ({:+.1}%, {})",
            s.eea_days_weather.avg_precipitation,
            s.all_days_weather.avg_precipitation,
            d.precipitation,
            c.precipitation_correlation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inventory() -> GridInventory {
        let square = Geometry::Polygon {
            coordinates: vec![vec![
                LonLat::new(-120.0, 34.0),
                LonLat::new(-118.0, 34.0),
                LonLat::new(-118.0, 36.0),
                LonLat::new(-120.0, 36.0),
            ]],
        };
        let alert = |id, ba_id, date, level| EnergyEmergencyAlert {
            id,
            ba_id,
            date,
            level,
            description: String::new(),
        };
        GridInventory {
            balancing_authorities: vec![
                BalancingAuthority {
                    id: 1,
                    name: "California ISO".into(),
                    abbreviation: "CISO".into(),
                    geometry: square,
                },
                BalancingAuthority {
                    id: 2,
                    name: "Bonneville Power Administration".into(),
                    abbreviation: "BPAT".into(),
                    geometry: Geometry::Unsupported {
                        kind: "MultiPolygon".into(),
                    },
                },
            ],
            alerts: vec![
                alert(1, 1, date(2020, 8, 14), 3),
                alert(2, 1, date(2020, 8, 15), 2),
                alert(3, 2, date(2020, 9, 6), 1),
                alert(4, 99, date(2020, 9, 7), 1),
                alert(5, 2, date(2020, 9, 8), 4),
            ],
            ..GridInventory::default()
        }
    }

    #[test]
    fn counts_by_level_ba_and_month() {
        let analysis = AlertAnalysis::analyze(&inventory(), None, None);
        // alert 4 references an unknown authority
        assert_eq!(analysis.summary.total_events, 4);
        assert_eq!(analysis.summary.by_level[&1], 1);
        assert_eq!(analysis.summary.by_level[&2], 1);
        assert_eq!(analysis.summary.by_level[&3], 1);
        assert!(!analysis.summary.by_level.contains_key(&4));
        assert_eq!(analysis.summary.by_ba["CISO"], 2);
        assert_eq!(analysis.summary.by_ba["BPAT"], 2);
        assert_eq!(analysis.summary.by_month["2020-08"], 2);
        assert_eq!(analysis.summary.by_month["2020-09"], 2);
    }

    #[test]
    fn date_window_is_inclusive() {
        let analysis =
            AlertAnalysis::analyze(&inventory(), Some(date(2020, 8, 15)), Some(date(2020, 9, 6)));
        let ids: Vec<i64> = analysis.events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn events_carry_authority_centroid() {
        let analysis = AlertAnalysis::analyze(&inventory(), None, Some(date(2020, 8, 14)));
        assert_eq!(analysis.events.len(), 1);
        assert_eq!(analysis.events[0].ba_location, Some(LonLat::new(-119.0, 35.0)));
    }

    fn weather(date: NaiveDate, max_temperature: f64, wind_speed: f64) -> WeatherObservation {
        WeatherObservation {
            date,
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

    #[test]
    fn correlation_pairs_alerts_with_same_day_weather() {
        let analysis =
            AlertAnalysis::analyze(&inventory(), Some(date(2020, 8, 13)), Some(date(2020, 8, 16)));
        let days = [
            weather(date(2020, 8, 13), 30.0, 4.0),
            weather(date(2020, 8, 14), 44.0, 2.0),
            weather(date(2020, 8, 15), 42.0, 4.0),
            weather(date(2020, 8, 16), 28.0, 6.0),
        ];
        let c = AlertWeatherCorrelation::correlate(&analysis, &days);

        let ids: Vec<i64> = c.correlation_data.iter().map(|a| a.eea_event.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(c.correlation_data[0].weather_data.avg_max_temperature, 44.0);

        let s = c.summary;
        assert_eq!(s.eea_days_weather.avg_max_temperature, 43.0);
        assert_eq!(s.all_days_weather.avg_max_temperature, 36.0);
        assert_eq!(s.eea_days_weather.avg_wind_speed, 3.0);
        assert_eq!(s.all_days_weather.avg_wind_speed, 4.0);
        // (43 - 36) / 36 and (3 - 4) / 4
        assert!((s.percentage_difference.max_temperature - 700.0 / 36.0).abs() < 1e-9);
        assert_eq!(s.percentage_difference.wind_speed, -25.0);
        assert_eq!(c.conclusion.temperature_correlation, CorrelationStrength::High);
        assert_eq!(c.conclusion.wind_correlation, CorrelationStrength::High);
        // zero baseline
        assert_eq!(s.percentage_difference.precipitation, 0.0);
        assert_eq!(c.conclusion.precipitation_correlation, CorrelationStrength::Low);
    }

    #[test]
    fn alert_without_weather_is_left_out() {
        let analysis = AlertAnalysis::analyze(&inventory(), None, None);
        let days = [weather(date(2020, 9, 6), 33.0, 5.0)];
        let c = AlertWeatherCorrelation::correlate(&analysis, &days);
        assert_eq!(c.correlation_data.len(), 1);
        assert_eq!(c.correlation_data[0].eea_event.id, 3);
        assert_eq!(c.summary.percentage_difference.max_temperature, 0.0);
        assert_eq!(c.conclusion.temperature_correlation, CorrelationStrength::Low);
    }

    #[test]
    fn correlation_without_weather_is_all_zero() {
        let analysis = AlertAnalysis::analyze(&inventory(), None, None);
        let c = AlertWeatherCorrelation::correlate(&analysis, &[]);
        assert!(c.correlation_data.is_empty());
        assert_eq!(c.summary.eea_days_weather, WeatherConditions::default());
        assert_eq!(c.summary.all_days_weather, WeatherConditions::default());
        assert!(c.to_string().contains("Alerts with weather:  0"));
    }

    #[test]
    fn empty_inventory_keeps_level_keys() {
        let analysis = AlertAnalysis::analyze(&GridInventory::default(), None, None);
        assert_eq!(analysis.summary.total_events, 0);
        assert_eq!(analysis.summary.by_level.len(), 3);
        assert!(analysis.summary.by_ba.is_empty());
    }
}
