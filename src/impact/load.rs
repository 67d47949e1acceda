use serde::{Deserialize, Serialize};

use super::types::LoadImpact;
use crate::grid::Load;

/// Temperature sensitivity of load demand.
///
/// The sensitivity coefficient depends on longitude,
/// `k = scale * (base - longitude_slope * longitude)`, and demand scales by
/// `1 + k * (T_max - T_ref)` where `T_ref` is the reference day's max temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSensitivity {
    pub base: f64,
    pub longitude_slope: f64,
    pub scale: f64,
}

impl Default for LoadSensitivity {
    fn default() -> Self {
        Self {
            base: 5.33,
            longitude_slope: 0.067,
            scale: 0.01,
        }
    }
}

impl LoadSensitivity {
    /// Sensitivity coefficient `k` for a longitude in decimal degrees.
    pub fn coefficient(&self, longitude: f64) -> f64 {
        self.scale * (self.base - self.longitude_slope * longitude)
    }

    /// Scales the load's demand for one day.
    ///
    /// Real power is clamped at zero; reactive power is not.
    pub fn apply(
        &self,
        load: &Load,
        longitude: f64,
        reference_temperature: f64,
        max_temperature: f64,
    ) -> LoadImpact {
        let factor = 1.0 + self.coefficient(longitude) * (max_temperature - reference_temperature);
        LoadImpact {
            pl_day: (load.p_load * factor).max(0.0),
            ql_day: load.q_load * factor,
        }
    }
}
