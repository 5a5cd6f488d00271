// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::graph::DatasetReference;
use crate::traits::{BackendClient, BackendResponse};
use serde_json::{json, Value};
use std::collections::HashMap;

/// A backend client answering metadata queries from a fixed table.
///
/// Unknown datasets get a 404 answer, the same way the remote service reports them.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    datasets: HashMap<(String, String, String), Value>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per configured catalog dataset.
    pub fn from_config(cfg: &Config) -> Self {
        let mut catalog = Self::new();
        for entry in &cfg.catalog {
            catalog.insert(&entry.reference(), entry.metadata.clone());
        }
        catalog
    }

    /// Register `metadata` for a dataset; references without a location are ignored.
    pub fn insert(&mut self, reference: &DatasetReference, metadata: Value) {
        if let (Some(collection), Some(namespace)) = (reference.collection(), reference.namespace()) {
            self.datasets.insert(
                (collection.to_string(), namespace.to_string(), reference.name().to_string()),
                metadata,
            );
        }
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl BackendClient for StaticCatalog {
    fn get_dataset_info(&self, collection: &str, namespace: &str, name: &str) -> BackendResponse {
        let key = (collection.to_string(), namespace.to_string(), name.to_string());
        match self.datasets.get(&key) {
            Some(metadata) => BackendResponse::ok(metadata.clone()),
            None => BackendResponse {
                status: 404,
                body: json!({
                    "status": "error",
                    "message": format!("dataset <{}> not found in <{}/{}>", name, collection, namespace),
                }),
            },
        }
    }
}
