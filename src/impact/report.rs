//! Engine output for one component.

use std::fmt;

use serde::Serialize;

use super::summary::ImpactSummary;
use super::types::DailyImpact;
use crate::grid::{ComponentKind, LonLat};

/// Daily impacts and their summary for one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub kind: ComponentKind,
    pub id: i64,
    pub name: String,
    /// Point the weather series was taken for.
    pub location: LonLat,
    pub daily: Vec<DailyImpact>,
    pub summary: ImpactSummary,
}

impl ImpactReport {
    /// Days whose date lies in `from..=to`; either bound may be open.
    pub fn daily_between(
        &self,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) -> Vec<&DailyImpact> {
        self.daily
            .iter()
            .filter(|d| from.is_none_or(|f| d.date() >= f) && to.is_none_or(|t| d.date() <= t))
            .collect()
    }
}

impl fmt::Display for ImpactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Impact Report ---")?;
        writeln!(f, "Component:  {} {} ({})", self.kind, self.id, self.name)?;
        writeln!(f, "Location:   {}", self.location)?;
        if let (Some(first), Some(last)) = (self.daily.first(), self.daily.last()) {
            writeln!(
                f,
                "Period:     {} to {} ({} days)",
                first.date(),
                last.date(),
                self.daily.len()
            )?;
        }
        writeln!(f)?;
        for day in &self.daily {
            writeln!(f, "{day}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}
