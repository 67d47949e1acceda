//! Per-day impact records.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::summary::Metric;
use crate::weather::WeatherObservation;

/// Temperature-scaled load demand for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadImpact {
    /// Real power demand (MW), never negative.
    #[serde(rename = "PL_day")]
    pub pl_day: f64,
    /// Reactive power demand (MVAr).
    #[serde(rename = "QL_day")]
    pub ql_day: f64,
}

/// Weather-adjusted generator output for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratorImpact {
    #[serde(rename = "Pgen_day")]
    pub pgen_day: f64,
    #[serde(rename = "Qgen_day")]
    pub qgen_day: f64,
    /// Multiplier applied to nameplate output; 1 for wind.
    #[serde(rename = "Efficiency")]
    pub efficiency: f64,
}

/// Temperature-adjusted line capacity for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BranchImpact {
    /// Capacity (MVA); NaN when the day's max temperature is not positive.
    #[serde(rename = "CL_day")]
    pub cl_day: f64,
}

/// Kind-specific impact sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ComponentImpact {
    #[serde(rename = "load_impact")]
    Load(LoadImpact),
    #[serde(rename = "generator_impact")]
    Generator(GeneratorImpact),
    #[serde(rename = "branch_impact")]
    Branch(BranchImpact),
}

impl ComponentImpact {
    /// Metric/value pairs carried by this record, in reporting order.
    pub fn metrics(&self) -> Vec<(Metric, f64)> {
        match self {
            Self::Load(l) => vec![(Metric::PlDay, l.pl_day), (Metric::QlDay, l.ql_day)],
            Self::Generator(g) => vec![
                (Metric::PgenDay, g.pgen_day),
                (Metric::QgenDay, g.qgen_day),
                (Metric::Efficiency, g.efficiency),
            ],
            Self::Branch(b) => vec![(Metric::ClDay, b.cl_day)],
        }
    }
}

/// One day of output: the full weather observation plus the component's impact.
///
/// `impact` is `None` for buses and substations, which have no impact model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyImpact {
    #[serde(flatten)]
    pub weather: WeatherObservation,
    #[serde(flatten)]
    pub impact: Option<ComponentImpact>,
}

impl DailyImpact {
    pub fn date(&self) -> NaiveDate {
        self.weather.date
    }
}

impl fmt::Display for DailyImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Tmax={:>6.2} Tavg={:>6.2} wind={:>5.2}",
            self.weather.date,
            self.weather.max_temperature,
            self.weather.avg_temperature,
            self.weather.wind_speed
        )?;
        match &self.impact {
            Some(ComponentImpact::Load(l)) => {
                write!(f, " | PL={:>9.3} QL={:>9.3}", l.pl_day, l.ql_day)
            }
            Some(ComponentImpact::Generator(g)) => write!(
                f,
                " | Pgen={:>9.3} Qgen={:>9.3} eff={:.3}",
                g.pgen_day, g.qgen_day, g.efficiency
            ),
            Some(ComponentImpact::Branch(b)) => write!(f, " | CL={:>9.3}", b.cl_day),
            None => Ok(()),
        }
    }
}
