// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::StaticCatalog;
use crate::config::{Config, TranslationOptions};
use crate::engine::TranslatorRegistry;
use crate::errors::TranslationResult;
use crate::graph::{ProcessChain, ProcessGraph};
use crate::traits::BackendClient;
use serde_json::Value;
use std::sync::Arc;

/// Everything a translation needs besides the graph itself.
///
/// The registry and backend are read-only once built and may be shared between
/// concurrent translations; every call to [`translate`](Self::translate) builds its
/// own graph and evaluation state.
///
/// # Example
/// ```
/// use process_chain::config::{Config, TranslationRuntime};
/// use serde_json::json;
///
/// let runtime = TranslationRuntime::from_config(&Config::default());
/// let chain = runtime.translate(&json!({
///     "load": { "process_id": "load_collection",
///               "arguments": { "id": "nc_spm_08.PERMANENT.raster.elevation" } }
/// })).unwrap();
///
/// assert_eq!(chain.modules(), vec!["r.info", "g.region"]);
/// ```
#[derive(Clone)]
pub struct TranslationRuntime {
    registry: TranslatorRegistry,
    backend: Arc<dyn BackendClient>,
    options: TranslationOptions,
}

impl TranslationRuntime {
    pub fn new(
        registry: TranslatorRegistry,
        backend: Arc<dyn BackendClient>,
        options: TranslationOptions,
    ) -> Self {
        Self {
            registry,
            backend,
            options,
        }
    }

    /// Built-in translators, a static catalog of the configured datasets, and the
    /// configured translation options.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            TranslatorRegistry::with_builtin_translators(),
            Arc::new(StaticCatalog::from_config(cfg)),
            cfg.translation.clone(),
        )
    }

    /// Bind a graph parameter, replacing any configured binding.
    pub fn bind_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.options.parameters.insert(name.into(), value);
    }

    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Build a graph from `description` and translate it.
    pub fn translate(&self, description: &Value) -> TranslationResult<ProcessChain> {
        let graph = ProcessGraph::build(description)?;
        graph.translate(&self.registry, self.backend.as_ref(), &self.options)
    }
}
