//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{DateRangeQuery, ErrorResponse, ReportResponse};
use crate::alerts::{AlertAnalysis, AlertWeatherCorrelation};
use crate::grid::GridStatistics;
use crate::weather::WeatherSummary;

/// `GET /report` → 200 + `ReportResponse` JSON
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<ReportResponse> {
    Json(ReportResponse::from(&state.report))
}

/// Returns daily impacts, optionally filtered by date range.
///
/// `GET /impacts` → 200 + every `DailyImpact`
/// `GET /impacts?from=D&to=D` → filtered range (inclusive)
/// `GET /impacts?from=2020-07-10&to=2020-07-01` → 400 + `ErrorResponse`
pub async fn get_impacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Some(error) = query.reversed() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error })));
    }
    let days: Vec<_> = state
        .report
        .daily_between(query.from, query.to)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(days))
}

/// `GET /grid/statistics` → 200 + `GridStatistics` JSON
pub async fn get_grid_statistics(State(state): State<Arc<AppState>>) -> Json<GridStatistics> {
    Json(state.inventory.statistics())
}

/// `GET /alerts?from=D&to=D` → 200 + `AlertAnalysis`, 400 on a reversed range
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Some(error) = query.reversed() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error })));
    }
    Ok(Json(AlertAnalysis::analyze(
        &state.inventory,
        query.from,
        query.to,
    )))
}

/// `GET /alerts/correlation?from=D&to=D` → 200 + `AlertWeatherCorrelation`, 400 on a reversed range
pub async fn get_alert_correlation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Some(error) = query.reversed() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error })));
    }
    let (start, end) = query.bounds();
    let analysis = AlertAnalysis::analyze(&state.inventory, query.from, query.to);
    Ok(Json(AlertWeatherCorrelation::correlate(
        &analysis,
        state.weather.between(start, end),
    )))
}

/// `GET /weather/summary?from=D&to=D` → 200 + `WeatherSummary`, 400 on a reversed range
pub async fn get_weather_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    if let Some(error) = query.reversed() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error })));
    }
    let (start, end) = query.bounds();
    Ok(Json(WeatherSummary::from_observations(
        state.weather.between(start, end),
    )))
}
