// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::errors::ConfigError;
use std::collections::HashSet;

/// Reject a config whose catalog lists the same dataset twice.
///
/// Backend lookups are keyed by collection, namespace and name, so two entries
/// differing only in kind also collide.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &config.catalog {
        let key = (entry.collection.as_str(), entry.namespace.as_str(), entry.name.as_str());
        if !seen.insert(key) {
            return Err(ConfigError::DuplicateCatalogEntry {
                dataset: entry.reference().encode(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogEntry;
    use crate::graph::DatasetKind;
    use serde_json::Value;

    fn entry(namespace: &str, name: &str, kind: DatasetKind) -> CatalogEntry {
        CatalogEntry {
            collection: "nc_spm_08".to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            metadata: Value::Null,
        }
    }

    #[test]
    fn test_valid_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_same_name_in_other_namespace_is_distinct() {
        let config = Config {
            catalog: vec![
                entry("PERMANENT", "elevation", DatasetKind::Raster),
                entry("user1", "elevation", DatasetKind::Raster),
                entry("PERMANENT", "slope", DatasetKind::Raster),
            ],
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_kind_does_not_disambiguate() {
        let config = Config {
            catalog: vec![
                entry("PERMANENT", "roads", DatasetKind::Raster),
                entry("PERMANENT", "roads", DatasetKind::Vector),
            ],
            ..Config::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::DuplicateCatalogEntry { dataset }) if dataset == "nc_spm_08.PERMANENT.vector.roads"
        ));
    }

    #[test]
    fn test_duplicate_entry() {
        let config = Config {
            catalog: vec![
                entry("PERMANENT", "elevation", DatasetKind::Raster),
                entry("PERMANENT", "elevation", DatasetKind::Raster),
            ],
            ..Config::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::DuplicateCatalogEntry { dataset }) if dataset == "nc_spm_08.PERMANENT.raster.elevation"
        ));
    }
}
