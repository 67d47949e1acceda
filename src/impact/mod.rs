//! Weather impact models, engine, and summary statistics.

/// Line thermal rating model.
pub mod branch;
pub mod engine;
/// Wind, solar, and thermal generator output models.
pub mod generator;
/// Load temperature-sensitivity model.
pub mod load;
pub mod report;
pub mod summary;
pub mod types;

pub use branch::LineRating;
pub use engine::{ImpactEngine, ImpactParams};
pub use generator::{GeneratorModels, SolarDerating, ThermalDerating, WindCurve};
pub use load::LoadSensitivity;
pub use report::ImpactReport;
pub use summary::{Extremes, ImpactSummary, Metric};
pub use types::{BranchImpact, ComponentImpact, DailyImpact, GeneratorImpact, LoadImpact};
