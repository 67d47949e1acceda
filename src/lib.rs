//! Weather impact assessment for power grid components.

/// Balancing authorities and energy emergency alert analysis.
pub mod alerts;
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod grid;
/// Impact models, engine, and summary statistics.
pub mod impact;
pub mod io;
pub mod weather;
