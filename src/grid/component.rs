//! Grid component records and the tagged union the impact engine consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{Geometry, LonLat};

/// An electrical node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: i64,
    pub name: String,
    /// 1 = PQ, 2 = PV, 3 = slack.
    #[serde(default)]
    pub bus_type: Option<i32>,
    #[serde(default)]
    pub base_kv: Option<f64>,
    pub geometry: Geometry,
}

/// A transmission line between two buses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub from_bus_id: Option<i64>,
    #[serde(default)]
    pub to_bus_id: Option<i64>,
    /// Thermal rating (MVA).
    pub rate1: f64,
    #[serde(default)]
    pub rate2: Option<f64>,
    #[serde(default)]
    pub rate3: Option<f64>,
    #[serde(default = "in_service_default")]
    pub in_service: bool,
    pub geometry: Geometry,
}

fn in_service_default() -> bool {
    true
}

/// A power producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bus_id: Option<i64>,
    /// Real power output (MW).
    pub p_gen: f64,
    /// Reactive power output (MVAr).
    pub q_gen: f64,
    #[serde(default)]
    pub p_max: Option<f64>,
    #[serde(default)]
    pub p_min: Option<f64>,
    #[serde(default)]
    pub q_max: Option<f64>,
    #[serde(default)]
    pub q_min: Option<f64>,
    /// Free-form technology tag, e.g. `"WT-Onshore"`.
    #[serde(default)]
    pub gen_type: Option<GenerationTechnology>,
    pub geometry: Geometry,
}

impl Generator {
    /// Technology used to pick the derating model; untagged units count as thermal.
    pub fn technology(&self) -> GenerationTechnology {
        self.gen_type
            .clone()
            .unwrap_or_else(|| GenerationTechnology::Other(String::new()))
    }
}

/// A power consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bus_id: Option<i64>,
    /// Real power demand (MW).
    pub p_load: f64,
    /// Reactive power demand (MVAr).
    pub q_load: f64,
    pub geometry: Geometry,
}

/// Physical substation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub voltage_kv: Option<f64>,
    pub geometry: Geometry,
}

/// Generation technology parsed from the `gen_type` tag.
///
/// Unknown tags are kept verbatim in [`GenerationTechnology::Other`] and get
/// the thermal derating curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenerationTechnology {
    WindOnshore,
    SolarTracking,
    SolarNonTracking,
    Other(String),
}

impl GenerationTechnology {
    pub fn tag(&self) -> &str {
        match self {
            Self::WindOnshore => "WT-Onshore",
            Self::SolarTracking => "SolarPV-Tracking",
            Self::SolarNonTracking => "SolarPV-NonTracking",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_solar(&self) -> bool {
        matches!(self, Self::SolarTracking | Self::SolarNonTracking)
    }
}

impl From<String> for GenerationTechnology {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "WT-Onshore" => Self::WindOnshore,
            "SolarPV-Tracking" => Self::SolarTracking,
            "SolarPV-NonTracking" => Self::SolarNonTracking,
            _ => Self::Other(tag),
        }
    }
}

impl From<GenerationTechnology> for String {
    fn from(tech: GenerationTechnology) -> Self {
        tech.tag().to_string()
    }
}

/// Component kind tag, as written on the command line and in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Bus,
    Branch,
    Generator,
    Load,
    Substation,
}

impl ComponentKind {
    pub const ALL: [Self; 5] = [
        Self::Bus,
        Self::Branch,
        Self::Generator,
        Self::Load,
        Self::Substation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Branch => "branch",
            Self::Generator => "generator",
            Self::Load => "load",
            Self::Substation => "substation",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown component kind \"{s}\", expected one of: bus, branch, generator, load, substation"
                )
            })
    }
}

/// One grid component, switched on its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridComponent {
    Bus(Bus),
    Branch(Branch),
    Generator(Generator),
    Load(Load),
    Substation(Substation),
}

impl GridComponent {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Bus(_) => ComponentKind::Bus,
            Self::Branch(_) => ComponentKind::Branch,
            Self::Generator(_) => ComponentKind::Generator,
            Self::Load(_) => ComponentKind::Load,
            Self::Substation(_) => ComponentKind::Substation,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Bus(c) => c.id,
            Self::Branch(c) => c.id,
            Self::Generator(c) => c.id,
            Self::Load(c) => c.id,
            Self::Substation(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bus(c) => &c.name,
            Self::Branch(c) => &c.name,
            Self::Generator(c) => &c.name,
            Self::Load(c) => &c.name,
            Self::Substation(c) => &c.name,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        match self {
            Self::Bus(c) => &c.geometry,
            Self::Branch(c) => &c.geometry,
            Self::Generator(c) => &c.geometry,
            Self::Load(c) => &c.geometry,
            Self::Substation(c) => &c.geometry,
        }
    }

    /// Point used for the weather lookup; `None` if the geometry cannot be resolved.
    pub fn location(&self) -> Option<LonLat> {
        self.geometry().representative_point()
    }
}
