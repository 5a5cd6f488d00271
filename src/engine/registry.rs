// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{TranslationError, TranslationResult};
use crate::graph::Node;
use crate::traits::Translator;
use crate::translators;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps operation ids to the translators that handle them.
///
/// Populated once at startup and read-only afterwards, so one registry can be
/// shared by concurrent translations. Lookups are exact-match on the id.
///
/// # Example
/// ```
/// use process_chain::engine::TranslatorRegistry;
///
/// let registry = TranslatorRegistry::with_builtin_translators();
/// assert!(registry.contains("load_collection"));
/// assert!(registry.get("no_such_process").is_none());
/// ```
#[derive(Clone, Default)]
pub struct TranslatorRegistry(BTreeMap<String, Arc<dyn Translator>>);

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A registry holding every translator this crate ships.
    pub fn with_builtin_translators() -> Self {
        let mut registry = Self::new();
        for translator in translators::builtin_translators() {
            registry.register(translator);
        }
        registry
    }

    /// Register a translator under its own process id; a later registration for
    /// the same id replaces the earlier one.
    pub fn register(&mut self, translator: Arc<dyn Translator>) {
        self.0.insert(translator.process_id().to_string(), translator);
    }

    pub fn get(&self, process_id: &str) -> Option<&Arc<dyn Translator>> {
        self.0.get(process_id)
    }

    pub fn contains(&self, process_id: &str) -> bool {
        self.0.contains_key(process_id)
    }

    /// The translator for `node`, or `UnsupportedOperation` listing every known id.
    pub fn resolve(&self, node: &Node) -> TranslationResult<&Arc<dyn Translator>> {
        self.0
            .get(node.process_id())
            .ok_or_else(|| TranslationError::UnsupportedOperation {
                node_id: node.id().to_string(),
                process_id: node.process_id().to_string(),
                known: self.process_ids().map(str::to_string).collect(),
            })
    }

    /// Registered ids, ascending.
    pub fn process_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(process id, description)` pairs, ascending by id.
    pub fn descriptions(&self) -> Vec<(&str, &'static str)> {
        self.0
            .iter()
            .map(|(id, translator)| (id.as_str(), translator.description()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("translator_count", &self.0.len())
            .field("process_ids", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}
