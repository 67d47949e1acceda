//! REST API over one computed impact report.
//!
//! GET endpoints:
//! - `/report`: component, location, and summary statistics
//! - `/impacts`: daily impacts with optional date-range filtering
//! - `/grid/statistics`: grid-wide component counts and totals
//! - `/alerts`: energy emergency alert analysis with optional date range
//! - `/alerts/correlation`: weather on alert days against the whole window
//! - `/weather/summary`: daily weather trends and extreme days

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::grid::GridInventory;
use crate::impact::ImpactReport;
use crate::weather::WeatherSeries;

pub use types::{DateRangeQuery, ErrorResponse, ReportResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once after the engine run and wrapped in `Arc`; all data is read-only.
pub struct AppState {
    /// Impact report for the queried component.
    pub report: ImpactReport,
    /// Grid the component was taken from.
    pub inventory: GridInventory,
    /// Full weather series the report window was cut from.
    pub weather: WeatherSeries,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/impacts", get(handlers::get_impacts))
        .route("/grid/statistics", get(handlers::get_grid_statistics))
        .route("/alerts", get(handlers::get_alerts))
        .route("/alerts/correlation", get(handlers::get_alert_correlation))
        .route("/weather/summary", get(handlers::get_weather_summary))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
