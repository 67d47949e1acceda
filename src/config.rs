//! TOML-based run configuration: input files, component query, and formula parameters.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::error::ImpactError;
use crate::grid::ComponentKind;
use crate::impact::{
    ImpactParams, LineRating, LoadSensitivity, SolarDerating, ThermalDerating, WindCurve,
};

/// Top-level run configuration parsed from TOML.
///
/// Every section is optional and falls back to its defaults, which reproduce
/// the reference formula constants. Load with [`RunConfig::from_toml_file`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Input file locations.
    pub inputs: InputsConfig,
    /// Which component and date window to assess.
    pub query: QueryConfig,
    /// Load temperature-sensitivity parameters.
    pub load: LoadConfig,
    /// Wind turbine power curve.
    pub wind: WindConfig,
    /// PV derating parameters.
    pub solar: SolarConfig,
    /// Thermal unit derating parameters.
    pub thermal: ThermalConfig,
    /// Line thermal rating parameters.
    pub branch: BranchConfig,
}

/// Input file locations. Relative paths resolve against the config file's directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    /// Grid inventory JSON document.
    pub grid: PathBuf,
    /// Daily weather CSV for the queried component's location.
    pub weather: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            grid: PathBuf::from("grid.json"),
            weather: PathBuf::from("weather.csv"),
        }
    }
}

/// Component selection and date window. Dates are quoted `"YYYY-MM-DD"` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub kind: Option<ComponentKind>,
    pub id: Option<i64>,
    /// First day (inclusive); open when absent.
    pub start: Option<NaiveDate>,
    /// Last day (inclusive); open when absent.
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Coefficient intercept (`5.33`).
    pub base: f64,
    /// Coefficient change per degree of longitude (`0.067`).
    pub longitude_slope: f64,
    /// Overall scale (`0.01`).
    pub scale: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        let d = LoadSensitivity::default();
        Self {
            base: d.base,
            longitude_slope: d.longitude_slope,
            scale: d.scale,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindConfig {
    /// m/s
    pub cut_in_speed: f64,
    /// m/s
    pub rated_speed: f64,
    /// m/s
    pub cut_out_speed: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        let d = WindCurve::default();
        Self {
            cut_in_speed: d.cut_in(),
            rated_speed: d.rated(),
            cut_out_speed: d.cut_out(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// °C above which PV derates.
    pub threshold: f64,
    /// Loss per °C above threshold.
    pub degradation: f64,
    /// Efficiency above threshold before the per-degree loss (0.0-1.0].
    pub nominal_efficiency: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        let d = SolarDerating::default();
        Self {
            threshold: d.threshold,
            degradation: d.degradation,
            nominal_efficiency: d.nominal_efficiency,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermalConfig {
    /// °C above which thermal units derate.
    pub threshold: f64,
    /// Loss per °C above threshold.
    pub degradation: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        let d = ThermalDerating::default();
        Self {
            threshold: d.threshold,
            degradation: d.degradation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchConfig {
    /// Rating scale factor (must be > 0).
    pub alpha: f64,
    /// °C at which a line carries its nameplate rating (must be > 0).
    pub reference_temperature: f64,
}

impl Default for BranchConfig {
    fn default() -> Self {
        let d = LineRating::default();
        Self {
            alpha: d.alpha,
            reference_temperature: d.reference_temperature,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Error, Debug)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"wind.rated_speed"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl RunConfig {
    /// Parses a configuration file and resolves its input paths against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            cfg.inputs.resolve_against(dir);
        }
        Ok(cfg)
    }

    /// Parses a configuration from a TOML string. Paths are kept as written.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let (Some(start), Some(end)) = (self.query.start, self.query.end) {
            if start > end {
                errors.push(ConfigError {
                    field: "query.start".into(),
                    message: format!("must be <= query.end ({end}), got {start}"),
                });
            }
        }

        let w = &self.wind;
        if w.cut_in_speed < 0.0 {
            errors.push(ConfigError {
                field: "wind.cut_in_speed".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(w.rated_speed > w.cut_in_speed) {
            errors.push(ConfigError {
                field: "wind.rated_speed".into(),
                message: "must be > wind.cut_in_speed".into(),
            });
        }
        if !(w.cut_out_speed >= w.rated_speed) {
            errors.push(ConfigError {
                field: "wind.cut_out_speed".into(),
                message: "must be >= wind.rated_speed".into(),
            });
        }

        let s = &self.solar;
        if s.degradation < 0.0 {
            errors.push(ConfigError {
                field: "solar.degradation".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(s.nominal_efficiency > 0.0 && s.nominal_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "solar.nominal_efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }

        if self.thermal.degradation < 0.0 {
            errors.push(ConfigError {
                field: "thermal.degradation".into(),
                message: "must be >= 0".into(),
            });
        }

        let b = &self.branch;
        if !(b.alpha > 0.0) {
            errors.push(ConfigError {
                field: "branch.alpha".into(),
                message: "must be > 0".into(),
            });
        }
        if !(b.reference_temperature > 0.0) {
            errors.push(ConfigError {
                field: "branch.reference_temperature".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }

    /// Builds the engine parameters.
    ///
    /// # Errors
    ///
    /// Returns `ImpactError::InvalidParameter` if the wind curve is degenerate.
    pub fn impact_params(&self) -> Result<ImpactParams, ImpactError> {
        Ok(ImpactParams {
            load: LoadSensitivity {
                base: self.load.base,
                longitude_slope: self.load.longitude_slope,
                scale: self.load.scale,
            },
            wind: WindCurve::new(
                self.wind.cut_in_speed,
                self.wind.rated_speed,
                self.wind.cut_out_speed,
            )?,
            solar: SolarDerating {
                threshold: self.solar.threshold,
                degradation: self.solar.degradation,
                nominal_efficiency: self.solar.nominal_efficiency,
            },
            thermal: ThermalDerating {
                threshold: self.thermal.threshold,
                degradation: self.thermal.degradation,
            },
            line: LineRating {
                alpha: self.branch.alpha,
                reference_temperature: self.branch.reference_temperature,
            },
        })
    }
}

impl InputsConfig {
    fn resolve_against(&mut self, dir: &Path) {
        if self.grid.is_relative() {
            self.grid = dir.join(&self.grid);
        }
        if self.weather.is_relative() {
            self.weather = dir.join(&self.weather);
        }
    }
}
