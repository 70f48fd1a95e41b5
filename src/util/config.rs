//! Build configuration.
//!
//! A build is described by a YAML file:
//!
//! ```yaml
//! base: /images/ubuntu20.sif
//! def: build/nmrpipe.def
//! sif: build/nmrpipe.sif
//! data: false
//! software:
//!   nmrpipe:          # latest release
//!   sparky: "3.115"   # pinned release
//! packages:
//!   emacs:
//!   python3: 3.8.2-0ubuntu2
//! ```
//!
//! Mapping order is significant: software is resolved and packages are
//! installed in the order written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::resolver::Request;

/// One `name: version` entry; `None` when the version was left empty.
pub type Pin = (String, Option<String>);

/// Container build configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Base image the definition bootstraps from
    pub base: PathBuf,

    /// Where the definition file is written
    #[serde(rename = "def")]
    pub definition: PathBuf,

    /// Image to be built from the definition; guarded like `def`
    #[serde(default)]
    pub sif: Option<PathBuf>,

    /// Install data packages along with code packages
    #[serde(default)]
    pub data: bool,

    /// Software families to resolve
    #[serde(default, deserialize_with = "ordered_pins")]
    pub software: Vec<Pin>,

    /// Debian packages installed as named
    #[serde(default, deserialize_with = "ordered_pins")]
    pub packages: Vec<Pin>,
}

impl BuildConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Software requests in configuration order.
    pub fn requests(&self) -> Vec<Request> {
        self.software
            .iter()
            .map(|(family, version)| Request {
                family: family.clone(),
                version: version.clone(),
            })
            .collect()
    }

    /// Explicitly named packages as `name` or `name=version`.
    pub fn named_packages(&self) -> Vec<String> {
        self.packages
            .iter()
            .map(|(name, version)| match version {
                Some(v) => format!("{}={}", name, v),
                None => name.clone(),
            })
            .collect()
    }
}

/// Render a YAML scalar as text. Numbers keep YAML's canonical form.
fn scalar(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        _ => None,
    }
}

fn ordered_pins<'de, D>(deserializer: D) -> std::result::Result<Vec<Pin>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(mapping) = Option::<Mapping>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    mapping
        .iter()
        .map(|(key, value)| -> std::result::Result<Pin, D::Error> {
            let name = match scalar(key) {
                Some(Some(name)) => name,
                _ => return Err(de::Error::custom(format!("invalid name {:?}", key))),
            };
            let version = scalar(value).ok_or_else(|| {
                de::Error::custom(format!("invalid version for `{}`: expected a scalar", name))
            })?;
            Ok((name, version))
        })
        .collect()
}
