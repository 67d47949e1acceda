//! API response and query types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::{ComponentKind, LonLat};
use crate::impact::{ImpactReport, ImpactSummary};

/// Report header and summary, without the daily series.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub kind: ComponentKind,
    pub id: i64,
    pub name: String,
    pub location: LonLat,
    /// First assessed date.
    pub start: Option<NaiveDate>,
    /// Last assessed date.
    pub end: Option<NaiveDate>,
    pub days: usize,
    pub summary: ImpactSummary,
}

impl From<&ImpactReport> for ReportResponse {
    fn from(r: &ImpactReport) -> Self {
        Self {
            kind: r.kind,
            id: r.id,
            name: r.name.clone(),
            location: r.location,
            start: r.daily.first().map(|d| d.date()),
            end: r.daily.last().map(|d| d.date()),
            days: r.daily.len(),
            summary: r.summary.clone(),
        }
    }
}

/// Optional inclusive date range, `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeQuery {
    /// Human-readable reason if `from` is after `to`.
    pub fn reversed(&self) -> Option<String> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => {
                Some(format!("`from` ({from}) must be <= `to` ({to})"))
            }
            _ => None,
        }
    }

    /// Both bounds, open ends widened to the full date range.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (
            self.from.unwrap_or(NaiveDate::MIN),
            self.to.unwrap_or(NaiveDate::MAX),
        )
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
