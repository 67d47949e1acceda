use serde::Serialize;

use super::types::GeneratorImpact;
use crate::error::ImpactError;
use crate::grid::{GenerationTechnology, Generator};
use crate::weather::WeatherObservation;

/// Piecewise-linear wind turbine power curve.
///
/// Zero output below cut-in or above cut-out, a linear ramp from cut-in to
/// rated speed, and nameplate output from rated speed up to cut-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindCurve {
    cut_in: f64,
    rated: f64,
    cut_out: f64,
}

impl Default for WindCurve {
    fn default() -> Self {
        Self {
            cut_in: 3.0,
            rated: 12.0,
            cut_out: 25.0,
        }
    }
}

impl WindCurve {
    /// Creates a power curve from speeds in m/s.
    ///
    /// # Errors
    ///
    /// Returns `ImpactError::InvalidParameter` if `rated <= cut_in` (the ramp
    /// would divide by zero or invert) or `cut_out < rated`.
    pub fn new(cut_in: f64, rated: f64, cut_out: f64) -> Result<Self, ImpactError> {
        if !(rated > cut_in) {
            return Err(ImpactError::InvalidParameter {
                field: "wind.rated_speed",
                message: format!("must be > cut-in speed {cut_in}, got {rated}"),
            });
        }
        if !(cut_out >= rated) {
            return Err(ImpactError::InvalidParameter {
                field: "wind.cut_out_speed",
                message: format!("must be >= rated speed {rated}, got {cut_out}"),
            });
        }
        Ok(Self {
            cut_in,
            rated,
            cut_out,
        })
    }

    pub fn cut_in(&self) -> f64 {
        self.cut_in
    }

    pub fn rated(&self) -> f64 {
        self.rated
    }

    pub fn cut_out(&self) -> f64 {
        self.cut_out
    }

    /// Real power output (MW) for a unit rated `p_gen` at `wind_speed`.
    pub fn output(&self, p_gen: f64, wind_speed: f64) -> f64 {
        if wind_speed < self.cut_in || wind_speed > self.cut_out {
            0.0
        } else if wind_speed < self.rated {
            p_gen * ((wind_speed - self.cut_in) / (self.rated - self.cut_in))
        } else {
            p_gen
        }
    }
}

/// High-temperature efficiency loss of PV modules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarDerating {
    /// °C above which the panel derates.
    pub threshold: f64,
    /// Fractional loss per °C above threshold (`ro_sf`).
    pub degradation: f64,
    /// Efficiency once the threshold is exceeded, before the per-degree loss (`eff_no`).
    pub nominal_efficiency: f64,
}

impl Default for SolarDerating {
    fn default() -> Self {
        Self {
            threshold: 35.0,
            degradation: 0.02,
            nominal_efficiency: 0.6,
        }
    }
}

impl SolarDerating {
    pub fn efficiency(&self, max_temperature: f64) -> f64 {
        if max_temperature <= self.threshold {
            1.0
        } else {
            self.nominal_efficiency * (1.0 - self.degradation * (max_temperature - self.threshold))
        }
    }
}

/// High-temperature efficiency loss of thermal units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermalDerating {
    /// °C above which the unit derates.
    pub threshold: f64,
    /// Fractional loss per °C above threshold (`ro_th`).
    pub degradation: f64,
}

impl Default for ThermalDerating {
    fn default() -> Self {
        Self {
            threshold: 40.0,
            degradation: 0.031,
        }
    }
}

impl ThermalDerating {
    pub fn efficiency(&self, max_temperature: f64) -> f64 {
        if max_temperature <= self.threshold {
            1.0
        } else {
            1.0 - self.degradation * (max_temperature - self.threshold)
        }
    }
}

/// Generator output models, one per technology class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GeneratorModels {
    pub wind: WindCurve,
    pub solar: SolarDerating,
    pub thermal: ThermalDerating,
}

impl GeneratorModels {
    /// Generator output for one day.
    ///
    /// Wind and solar keep reactive power unchanged; thermal units scale
    /// both real and reactive power by the efficiency.
    pub fn apply(&self, generator: &Generator, weather: &WeatherObservation) -> GeneratorImpact {
        let (p, q) = (generator.p_gen, generator.q_gen);
        match generator.technology() {
            GenerationTechnology::WindOnshore => GeneratorImpact {
                pgen_day: self.wind.output(p, weather.wind_speed),
                qgen_day: q,
                efficiency: 1.0,
            },
            tech if tech.is_solar() => {
                let eff = self.solar.efficiency(weather.max_temperature);
                GeneratorImpact {
                    pgen_day: p * eff,
                    qgen_day: q,
                    efficiency: eff,
                }
            }
            _ => {
                let eff = self.thermal.efficiency(weather.max_temperature);
                GeneratorImpact {
                    pgen_day: p * eff,
                    qgen_day: q * eff,
                    efficiency: eff,
                }
            }
        }
    }
}
