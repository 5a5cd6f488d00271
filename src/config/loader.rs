// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use crate::graph::{DatasetKind, DatasetReference};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration for translating process graphs.
///
/// Every section is optional; an empty document equals `Config::default()`.
///
/// # Fields
/// * `translation` - How the dispatcher evaluates graphs
/// * `catalog` - Datasets the static backend client answers metadata queries for
///
/// # Example
/// ```yaml
/// translation:
///   shared_dependencies: reuse
///   allow_mixed_locations: false
///   parameters:
///     t0: "2001-01-01"
/// catalog:
///   - collection: nc_spm_08
///     namespace: PERMANENT
///     name: elevation
///     kind: raster
///     metadata: { nsres: 10.0, ewres: 10.0 }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translation: TranslationOptions,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

/// What to do when a node is reached along more than one dependency path.
///
/// # Variants
/// * `Reuse` - Translate it once, later visits get its references and no commands
/// * `Reevaluate` - Run its translator on every visit, repeating its commands
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum SharedDependencyPolicy {
    #[default]
    Reuse,
    Reevaluate,
}

/// Options for one translation.
///
/// # Fields
/// * `shared_dependencies` - Policy for nodes with several dependents (defaults to reuse)
/// * `allow_mixed_locations` - Accept graphs reading from more than one location (defaults to false)
/// * `parameters` - Bindings for `from_parameter` references, overriding graph defaults
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TranslationOptions {
    #[serde(default)]
    pub shared_dependencies: SharedDependencyPolicy,
    #[serde(default)]
    pub allow_mixed_locations: bool,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

/// One dataset the static backend knows about.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogEntry {
    pub collection: String,
    pub namespace: String,
    pub name: String,
    pub kind: DatasetKind,
    #[serde(default)]
    pub metadata: Value,
}

impl CatalogEntry {
    pub fn reference(&self) -> DatasetReference {
        DatasetReference::new(&self.collection, &self.namespace, self.kind, &self.name)
    }
}

/// Load a config from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a config and check it for duplicate catalog entries
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg)?;
    Ok(cfg)
}
