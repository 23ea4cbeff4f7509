//! `.steward.yml` schema
//!
//! ```yaml
//! enable: true          # global switch, default true
//! npm_and_yarn:
//!   enable: false       # per-ecosystem switch, default true
//! ```
//!
//! Unknown keys are ignored. A top level that is not a mapping, an
//! ecosystem section that is not a mapping, or an `enable` that is not a
//! boolean (including an empty `enable:`) is a schema error.

use crate::ecosystem::Ecosystem;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Per-ecosystem section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcosystemConfig {
    /// Per-ecosystem switch
    pub enable: Option<bool>,
}

/// Parsed per-repository configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StewardConfig {
    /// Global switch
    pub enable: Option<bool>,
    /// Sections keyed by catalog ecosystem
    pub ecosystems: HashMap<Ecosystem, EcosystemConfig>,
}

/// Whether the configuration lets a given ecosystem merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    /// Merging allowed
    Enabled,
    /// `enable: false` at the top level
    GloballyDisabled,
    /// `<ecosystem>: { enable: false }`
    EcosystemDisabled(Ecosystem),
}

impl StewardConfig {
    /// Parse and validate the document text
    ///
    /// An empty document is the all-default configuration.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value =
            serde_yaml::from_str(text).map_err(|e| format!("invalid YAML: {e}"))?;

        match document {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => Self::from_mapping(&mapping),
            _ => Err("top-level value must be a mapping".to_string()),
        }
    }

    fn from_mapping(mapping: &Mapping) -> Result<Self, String> {
        let mut config = Self {
            enable: read_enable(mapping, "enable")?,
            ecosystems: HashMap::new(),
        };

        for (key, value) in mapping {
            let Some(ecosystem) = key.as_str().and_then(|k| k.parse::<Ecosystem>().ok()) else {
                continue;
            };
            let section = match value {
                Value::Mapping(inner) => EcosystemConfig {
                    enable: read_enable(inner, &format!("{ecosystem}.enable"))?,
                },
                _ => return Err(format!("'{ecosystem}' must be a mapping")),
            };
            config.ecosystems.insert(ecosystem, section);
        }

        Ok(config)
    }

    /// Effective switch: global `enable` and the ecosystem's `enable`, both defaulting to true
    pub fn enablement(&self, ecosystem: Ecosystem) -> Enablement {
        if !self.enable.unwrap_or(true) {
            return Enablement::GloballyDisabled;
        }
        let ecosystem_enabled = self
            .ecosystems
            .get(&ecosystem)
            .and_then(|section| section.enable)
            .unwrap_or(true);
        if ecosystem_enabled {
            Enablement::Enabled
        } else {
            Enablement::EcosystemDisabled(ecosystem)
        }
    }
}

/// Read the `enable` key of a mapping; `field` names it in error messages
fn read_enable(mapping: &Mapping, field: &str) -> Result<Option<bool>, String> {
    match mapping.get("enable") {
        None => Ok(None),
        Some(Value::Bool(enable)) => Ok(Some(*enable)),
        Some(_) => Err(format!("'{field}' must be a boolean")),
    }
}
