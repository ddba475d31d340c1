//! Tracker configuration.
//!
//! A run is described by the integrator to use, the in-use product streams and the
//! landfill decay groups those streams feed. The defaults reproduce the standard
//! product set; a TOML file can override any part of it:
//!
//! ```toml
//! integrator = "trapezoid"
//!
//! [[streams]]
//! name = "Construction"
//! label = "Construction"
//! recycles = true
//! landfill_group = "con"
//!
//! [[landfill_groups]]
//! key = "con"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use wpct_core::errors::{WpctError, WpctResult};
use wpct_core::integrate::IntegratorKind;

/// An in-use product stream: production → disposal → (recycling) → landfill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductStream {
    /// Production column and parameter product name
    pub name: String,
    /// Prefix of the stream's ledger columns
    pub label: String,
    /// Whether part of the disposals is recycled; otherwise all disposals go to landfill
    #[serde(default = "default_recycles")]
    pub recycles: bool,
    /// Key of the landfill group receiving the stream's landfill input
    pub landfill_group: String,
}

fn default_recycles() -> bool {
    true
}

impl ProductStream {
    pub fn new(name: &str, label: &str, recycles: bool, landfill_group: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            recycles,
            landfill_group: landfill_group.to_string(),
        }
    }
}

/// Landfill inputs sharing one set of survival parameters.
///
/// Parameters are read from product `Landfill` with variables `<key>_decay1` and
/// `<key>_decay2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandfillGroup {
    pub key: String,
}

impl LandfillGroup {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn decay_variables(&self) -> (String, String) {
        (
            format!("{}_decay1", self.key),
            format!("{}_decay2", self.key),
        )
    }
}

pub fn default_streams() -> Vec<ProductStream> {
    vec![
        ProductStream::new("Construction", "Construction", true, "con"),
        ProductStream::new("Exterior", "Exterior", false, "ext"),
        ProductStream::new("Household", "Household", true, "hou"),
        ProductStream::new("Graphic Paper", "GraphicPaper", true, "pap"),
        ProductStream::new("Other Paper", "OtherPaper", true, "pap"),
        ProductStream::new("Household Paper", "HouseholdPaper", false, "pap"),
    ]
}

pub fn default_landfill_groups() -> Vec<LandfillGroup> {
    ["con", "ext", "hou", "pap"]
        .into_iter()
        .map(LandfillGroup::new)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    #[serde(default)]
    pub integrator: IntegratorKind,
    #[serde(default = "default_streams")]
    pub streams: Vec<ProductStream>,
    #[serde(default = "default_landfill_groups")]
    pub landfill_groups: Vec<LandfillGroup>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::default(),
            streams: default_streams(),
            landfill_groups: default_landfill_groups(),
        }
    }
}

impl TrackerConfig {
    pub fn from_toml_str(content: &str) -> WpctResult<Self> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> WpctResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    /// Check that stream names, labels and group keys are unique and that every stream
    /// feeds a configured landfill group.
    pub fn validate(&self) -> WpctResult<()> {
        let mut keys = HashSet::new();
        for group in &self.landfill_groups {
            if !keys.insert(group.key.as_str()) {
                return Err(WpctError::Config(format!(
                    "duplicate landfill group {:?}",
                    group.key
                )));
            }
        }

        let mut names = HashSet::new();
        let mut labels = HashSet::new();
        for stream in &self.streams {
            if !names.insert(stream.name.as_str()) {
                return Err(WpctError::Config(format!(
                    "duplicate product stream {:?}",
                    stream.name
                )));
            }
            if !labels.insert(stream.label.as_str()) {
                return Err(WpctError::Config(format!(
                    "duplicate stream label {:?}",
                    stream.label
                )));
            }
            if !keys.contains(stream.landfill_group.as_str()) {
                return Err(WpctError::Config(format!(
                    "stream {:?} feeds unknown landfill group {:?}",
                    stream.name, stream.landfill_group
                )));
            }
        }
        Ok(())
    }
}
