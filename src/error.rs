//! Error types for input loading and impact assessment.

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::ComponentKind;

/// Why the engine produced no impact report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    /// The component's geometry yields no representative point.
    #[error("{kind} {id}: no location can be resolved from {geometry} geometry")]
    UnresolvableLocation {
        kind: ComponentKind,
        id: i64,
        geometry: String,
    },

    /// No weather observations cover the requested window.
    #[error("{kind} {id}: no weather observations available, impacts cannot be computed")]
    EmptyWeatherSeries { kind: ComponentKind, id: i64 },

    /// A formula parameter makes the model undefined.
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },
}

/// Failure reading a grid document or weather file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid grid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid weather CSV: {0}")]
    Csv(#[from] csv::Error),
}
