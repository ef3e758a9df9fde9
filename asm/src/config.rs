use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

/// What to do when a name is defined a second time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redefinition {
    /// Last definition wins, silently.
    #[default]
    Overwrite,
    /// Last definition wins, with a warning pointing at both definitions.
    Warn,
    /// Translation fails.
    Error,
}

/// What to do with a name that never received an address.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unresolved {
    /// Emit the bare name.
    #[default]
    Keep,
    /// Translation fails.
    Error,
}

/// Translation options, optionally loaded from a YAML file:
///
/// ```yaml
/// redefinition: warn
/// unresolved: error
/// vm: ./VirtualMachine9
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub redefinition: Redefinition,
    pub unresolved: Unresolved,
    pub vm: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::ConfigOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::ConfigParse(path.to_string(), e))
    }

    pub fn strict() -> Self {
        Config {
            redefinition: Redefinition::Error,
            unresolved: Unresolved::Error,
            vm: None,
        }
    }
}
