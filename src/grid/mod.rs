//! Grid topology inventory: component records, geometry, and grid-wide statistics.

/// Component records and the [`GridComponent`] union.
pub mod component;
pub mod geometry;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alerts::{BalancingAuthority, EnergyEmergencyAlert};
use crate::error::InputError;

pub use component::{
    Branch, Bus, ComponentKind, GenerationTechnology, Generator, GridComponent, Load, Substation,
};
pub use geometry::{Geometry, LonLat};

/// Every record of one grid, as loaded from a JSON document.
///
/// All arrays are optional in the document and default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridInventory {
    pub buses: Vec<Bus>,
    pub branches: Vec<Branch>,
    pub generators: Vec<Generator>,
    pub loads: Vec<Load>,
    pub substations: Vec<Substation>,
    pub balancing_authorities: Vec<BalancingAuthority>,
    pub alerts: Vec<EnergyEmergencyAlert>,
}

impl GridInventory {
    /// Reads a grid document from disk.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if the file cannot be read or is not a valid document.
    pub fn from_json_path(path: &Path) -> Result<Self, InputError> {
        let raw = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let inventory = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            buses = inventory.buses.len(),
            branches = inventory.branches.len(),
            generators = inventory.generators.len(),
            loads = inventory.loads.len(),
            substations = inventory.substations.len(),
            "loaded grid inventory"
        );
        Ok(inventory)
    }

    /// Parses a grid document.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if the JSON is malformed or has unknown top-level keys.
    pub fn from_json_str(s: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Looks up a component by kind and identifier.
    pub fn component(&self, kind: ComponentKind, id: i64) -> Option<GridComponent> {
        match kind {
            ComponentKind::Bus => find(&self.buses, id, |c| c.id).map(GridComponent::Bus),
            ComponentKind::Branch => find(&self.branches, id, |c| c.id).map(GridComponent::Branch),
            ComponentKind::Generator => {
                find(&self.generators, id, |c| c.id).map(GridComponent::Generator)
            }
            ComponentKind::Load => find(&self.loads, id, |c| c.id).map(GridComponent::Load),
            ComponentKind::Substation => {
                find(&self.substations, id, |c| c.id).map(GridComponent::Substation)
            }
        }
    }

    /// Computes component counts and generation/load totals.
    pub fn statistics(&self) -> GridStatistics {
        let mut by_type: BTreeMap<String, GenerationGroup> = BTreeMap::new();
        for g in &self.generators {
            let tag = match &g.gen_type {
                Some(t) if !t.tag().is_empty() => t.tag().to_string(),
                _ => "Unknown".to_string(),
            };
            let group = by_type.entry(tag).or_default();
            group.count += 1;
            group.total_capacity += g.p_max.unwrap_or(0.0);
        }

        let total_load: f64 = self.loads.iter().map(|l| l.p_load).sum();
        let total_capacity: f64 = self.generators.iter().filter_map(|g| g.p_max).sum();
        let generation_to_load_ratio = if total_load > 0.0 {
            total_capacity / total_load
        } else {
            0.0
        };

        GridStatistics {
            component_counts: ComponentCounts {
                buses: self.buses.len(),
                branches: self.branches.len(),
                generators: self.generators.len(),
                loads: self.loads.len(),
                substations: self.substations.len(),
                balancing_authorities: self.balancing_authorities.len(),
            },
            generation_by_type: by_type,
            total_capacity,
            total_load,
            generation_to_load_ratio,
        }
    }
}

fn find<T: Clone>(records: &[T], id: i64, key: impl Fn(&T) -> i64) -> Option<T> {
    records.iter().find(|r| key(r) == id).cloned()
}

/// Number of records per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCounts {
    pub buses: usize,
    pub branches: usize,
    pub generators: usize,
    pub loads: usize,
    pub substations: usize,
    pub balancing_authorities: usize,
}

/// Generators sharing one technology tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationGroup {
    pub count: usize,
    /// Sum of `p_max` (MW); units without `p_max` contribute zero.
    pub total_capacity: f64,
}

/// Grid-wide totals.
#[derive(Debug, Clone, Serialize)]
pub struct GridStatistics {
    pub component_counts: ComponentCounts,
    pub generation_by_type: BTreeMap<String, GenerationGroup>,
    /// Sum of generator `p_max` (MW).
    pub total_capacity: f64,
    /// Sum of load `p_load` (MW).
    pub total_load: f64,
    /// `total_capacity / total_load`, or 0 when there is no load.
    pub generation_to_load_ratio: f64,
}

impl fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.component_counts;
        writeln!(f, "--- Grid Statistics ---")?;
        writeln!(f, "Buses:                  {}", c.buses)?;
        writeln!(f, "Branches:               {}", c.branches)?;
        writeln!(f, "Generators:             {}", c.generators)?;
        writeln!(f, "Loads:                  {}", c.loads)?;
        writeln!(f, "Substations:            {}", c.substations)?;
        writeln!(f, "Balancing authorities:  {}", c.balancing_authorities)?;
        for (tag, group) in &self.generation_by_type {
            writeln!(
                f,
                "  {tag:<22}{:>4} units {:>10.2} MW",
                group.count, group.total_capacity
            )?;
        }
        writeln!(f, "Total capacity:         {:.2} MW", self.total_capacity)?;
        writeln!(f, "Total load:             {:.2} MW", self.total_load)?;
        writeln!(f, "Generation/load ratio:  {:.3}", self.generation_to_load_ratio)
    }
}
