//! Impact engine that applies the per-kind models to a weather series.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ImpactError;
use crate::grid::GridComponent;
use crate::weather::WeatherObservation;

use super::branch::LineRating;
use super::generator::{GeneratorModels, SolarDerating, ThermalDerating, WindCurve};
use super::load::LoadSensitivity;
use super::report::ImpactReport;
use super::summary::ImpactSummary;
use super::types::{BranchImpact, ComponentImpact, DailyImpact};

/// Every tunable constant of the impact formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ImpactParams {
    pub load: LoadSensitivity,
    pub wind: WindCurve,
    pub solar: SolarDerating,
    pub thermal: ThermalDerating,
    pub line: LineRating,
}

impl ImpactParams {
    fn generator_models(&self) -> GeneratorModels {
        GeneratorModels {
            wind: self.wind,
            solar: self.solar,
            thermal: self.thermal,
        }
    }
}

/// Stateless impact calculator.
///
/// Each call to [`ImpactEngine::assess`] is independent; identical inputs
/// give identical reports.
#[derive(Debug, Clone, Default)]
pub struct ImpactEngine {
    params: ImpactParams,
}

impl ImpactEngine {
    pub fn new(params: ImpactParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ImpactParams {
        &self.params
    }

    /// Computes the daily impacts and their summary for one component.
    ///
    /// # Arguments
    ///
    /// * `component` - The component to assess
    /// * `weather` - Date-ordered observations for the component's location;
    ///   the first entry is the reference day for load sensitivity
    ///
    /// # Returns
    ///
    /// One `DailyImpact` per observation, in input order, plus the summary.
    ///
    /// # Errors
    ///
    /// `UnresolvableLocation` if the geometry yields no point, checked first;
    /// `EmptyWeatherSeries` if `weather` is empty.
    pub fn assess(
        &self,
        component: &GridComponent,
        weather: &[WeatherObservation],
    ) -> Result<ImpactReport, ImpactError> {
        let kind = component.kind();
        let id = component.id();

        let location = component
            .location()
            .ok_or_else(|| ImpactError::UnresolvableLocation {
                kind,
                id,
                geometry: component.geometry().kind().to_string(),
            })?;

        let Some(reference) = weather.first() else {
            return Err(ImpactError::EmptyWeatherSeries { kind, id });
        };
        let reference_temperature = reference.max_temperature;

        debug!(
            %kind,
            id,
            %location,
            days = weather.len(),
            reference_temperature,
            "assessing component"
        );

        let models = self.params.generator_models();
        let daily: Vec<DailyImpact> = weather
            .iter()
            .map(|obs| {
                let impact = match component {
                    GridComponent::Load(load) => Some(ComponentImpact::Load(self.params.load.apply(
                        load,
                        location.longitude,
                        reference_temperature,
                        obs.max_temperature,
                    ))),
                    GridComponent::Generator(generator) => {
                        Some(ComponentImpact::Generator(models.apply(generator, obs)))
                    }
                    GridComponent::Branch(branch) => {
                        let cl_day = self.params.line.capacity(branch.rate1, obs.max_temperature);
                        if cl_day.is_nan() {
                            warn!(
                                id,
                                date = %obs.date,
                                max_temperature = obs.max_temperature,
                                "non-positive max temperature, line capacity undefined for this day"
                            );
                        }
                        Some(ComponentImpact::Branch(BranchImpact { cl_day }))
                    }
                    GridComponent::Bus(_) | GridComponent::Substation(_) => None,
                };
                DailyImpact {
                    weather: *obs,
                    impact,
                }
            })
            .collect();

        let summary = ImpactSummary::from_daily(&daily)
            .ok_or(ImpactError::EmptyWeatherSeries { kind, id })?;

        Ok(ImpactReport {
            kind,
            id,
            name: component.name().to_string(),
            location,
            daily,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::grid::{Branch, Bus, Geometry, LonLat};
    use crate::impact::summary::Metric;

    fn obs(day: u32, max_temperature: f64) -> WeatherObservation {
        WeatherObservation {
            date: NaiveDate::from_ymd_opt(2022, 6, day).unwrap(),
            max_temperature,
            avg_temperature: max_temperature - 6.0,
            min_temperature: max_temperature - 12.0,
            relative_humidity: 35.0,
            specific_humidity: 6.0,
            longwave_radiation: 320.0,
            shortwave_radiation: 850.0,
            precipitation: 0.0,
            wind_speed: 6.0,
        }
    }

    fn branch(geometry: Geometry) -> GridComponent {
        GridComponent::Branch(Branch {
            id: 3,
            name: "Line 3".into(),
            from_bus_id: Some(1),
            to_bus_id: Some(2),
            rate1: 400.0,
            rate2: None,
            rate3: None,
            in_service: true,
            geometry,
        })
    }

    #[test]
    fn unresolvable_location_is_reported_before_empty_weather() {
        let c = branch(Geometry::LineString {
            coordinates: Vec::new(),
        });
        let err = ImpactEngine::default().assess(&c, &[]).unwrap_err();
        assert!(matches!(err, ImpactError::UnresolvableLocation { id: 3, .. }));
    }

    #[test]
    fn empty_weather_is_an_error() {
        let c = branch(Geometry::LineString {
            coordinates: vec![LonLat::new(-100.0, 40.0), LonLat::new(-101.0, 41.0)],
        });
        let err = ImpactEngine::default().assess(&c, &[]).unwrap_err();
        assert_eq!(
            err,
            ImpactError::EmptyWeatherSeries {
                kind: crate::grid::ComponentKind::Branch,
                id: 3
            }
        );
    }

    #[test]
    fn freezing_branch_day_is_nan_without_aborting() {
        let c = branch(Geometry::LineString {
            coordinates: vec![LonLat::new(-100.0, 40.0), LonLat::new(-101.0, 41.0)],
        });
        let weather = [obs(1, 40.0), obs(2, -3.0), obs(3, 50.0)];
        let report = ImpactEngine::default().assess(&c, &weather).unwrap();
        assert_eq!(report.daily.len(), 3);
        let cl: Vec<f64> = report
            .daily
            .iter()
            .map(|d| match d.impact {
                Some(ComponentImpact::Branch(b)) => b.cl_day,
                _ => panic!("expected branch impact"),
            })
            .collect();
        assert!(cl[1].is_nan());
        let extremes = report.summary.get(Metric::ClDay).unwrap();
        assert_eq!(extremes.max, cl[0]);
        assert_eq!(extremes.min, cl[2]);
    }

    #[test]
    fn bus_days_carry_weather_only() {
        let bus = GridComponent::Bus(Bus {
            id: 1,
            name: "B1".into(),
            bus_type: Some(1),
            base_kv: Some(230.0),
            geometry: Geometry::Point {
                coordinates: LonLat::new(-105.0, 39.0),
            },
        });
        let report = ImpactEngine::default()
            .assess(&bus, &[obs(1, 30.0), obs(2, 31.0)])
            .unwrap();
        assert!(report.daily.iter().all(|d| d.impact.is_none()));
        assert_eq!(report.summary.len(), 9);
        assert_eq!(report.location, LonLat::new(-105.0, 39.0));
    }
}
