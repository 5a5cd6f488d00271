// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The process graph: a wired set of nodes and the sinks it computes.
//!
//! # Building
//!
//! [`ProcessGraph::build`] accepts either a bare mapping of node id to node
//! description, or a wrapper carrying `title`/`description`/`parameters` around a
//! `process_graph` mapping. A `process_graph` entry that is itself a node
//! description (it has a `process_id`) is a node of a bare mapping. A document
//! holding only wrapper metadata has no mapping and is empty. Construction runs in
//! passes:
//!
//! 1. **Nodes**: one [`Node`] per mapping entry
//! 2. **Wiring**: every recorded `(argument, node id)` pair is checked against the
//!    node set and the reciprocal dependent edge is added
//! 3. **Cycles**: a depth-first search rejects circular references
//! 4. **Sinks**: every node with no dependents is a result of the whole graph
//!
//! # Example
//! ```
//! use process_chain::graph::ProcessGraph;
//! use serde_json::json;
//!
//! let graph = ProcessGraph::build(&json!({
//!     "title": "elevation",
//!     "process_graph": {
//!         "load": { "process_id": "load_collection",
//!                   "arguments": { "id": "nc_spm_08.PERMANENT.raster.elevation" } },
//!         "save": { "process_id": "save_result",
//!                   "arguments": { "data": {"from_node": "load"} }, "result": true }
//!     }
//! })).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.sinks(), &["save".to_string()]);
//! ```

use crate::config::TranslationOptions;
use crate::engine::{TranslationContext, TranslatorRegistry};
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::validation::find_cycle;
use crate::graph::{Node, ProcessChain};
use crate::observability::messages::graph::{GraphBuilt, ResultFlagMismatch};
use crate::observability::messages::translation::TranslationCompleted;
use crate::observability::messages::StructuredLog;
use crate::traits::BackendClient;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

const PROCESS_GRAPH_KEY: &str = "process_graph";
const TITLE_KEY: &str = "title";
const DESCRIPTION_KEY: &str = "description";
const PARAMETERS_KEY: &str = "parameters";

const WRAPPER_KEYS: [&str; 3] = [TITLE_KEY, DESCRIPTION_KEY, PARAMETERS_KEY];

/// A node description carries its operation id; a mapping of nodes does not.
///
/// Tells a bare mapping with a node named `process_graph` from the wrapper form.
fn is_node_description(value: &Value) -> bool {
    value.get("process_id").map_or(false, Value::is_string)
}

/// A graph-level input parameter declared by the wrapper form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParameterDeclaration {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ProcessGraph {
    title: Option<String>,
    description: Option<String>,
    parameters: Vec<ParameterDeclaration>,
    nodes: BTreeMap<String, Node>,
    sinks: Vec<String>,
}

impl ProcessGraph {
    /// Parse and wire a client description.
    pub fn build(description: &Value) -> TranslationResult<Self> {
        let document = description
            .as_object()
            .ok_or_else(|| TranslationError::InvalidDescription {
                reason: "process graph description must be a JSON object".to_string(),
            })?;

        let (mapping, wrapper) = match document.get(PROCESS_GRAPH_KEY) {
            Some(mapping) if !is_node_description(mapping) => (mapping, Some(document)),
            // metadata without a mapping
            None if document.keys().all(|key| WRAPPER_KEYS.contains(&key.as_str())) => {
                return Err(TranslationError::EmptyGraph)
            }
            _ => (description, None),
        };

        let mapping = match mapping {
            Value::Null => return Err(TranslationError::EmptyGraph),
            Value::Object(map) if map.is_empty() => return Err(TranslationError::EmptyGraph),
            Value::Object(map) => map,
            _ => {
                return Err(TranslationError::InvalidDescription {
                    reason: format!("'{}' must be an object of node descriptions", PROCESS_GRAPH_KEY),
                })
            }
        };

        let mut nodes = BTreeMap::new();
        for (node_id, node_description) in mapping {
            nodes.insert(node_id.clone(), Node::from_description(node_id, node_description)?);
        }

        Self::wire(&mut nodes)?;

        if let Some(cycle) = find_cycle(&nodes) {
            return Err(TranslationError::CyclicDependency { cycle });
        }

        let sinks: Vec<String> = nodes
            .values()
            .filter(|node| node.dependents().is_empty())
            .map(|node| node.id().to_string())
            .collect();

        let title = wrapper
            .and_then(|w| w.get(TITLE_KEY))
            .and_then(Value::as_str)
            .map(str::to_string);
        let graph_description = wrapper
            .and_then(|w| w.get(DESCRIPTION_KEY))
            .and_then(Value::as_str)
            .map(str::to_string);
        let parameters = match wrapper.and_then(|w| w.get(PARAMETERS_KEY)) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => Vec::<ParameterDeclaration>::deserialize(value).map_err(|e| {
                TranslationError::InvalidDescription {
                    reason: format!("invalid '{}': {}", PARAMETERS_KEY, e),
                }
            })?,
        };

        let graph = Self {
            title,
            description: graph_description,
            parameters,
            nodes,
            sinks,
        };

        GraphBuilt {
            title: graph.title.as_deref(),
            node_count: graph.nodes.len(),
            sink_count: graph.sinks.len(),
        }
        .log();

        for node in graph.nodes.values() {
            if node.is_result() && !node.dependents().is_empty() {
                ResultFlagMismatch {
                    node_id: node.id(),
                    dependent_count: node.dependents().len(),
                }
                .log();
            }
        }

        Ok(graph)
    }

    /// Resolve every dependency id and record the reciprocal dependent edge.
    fn wire(nodes: &mut BTreeMap<String, Node>) -> TranslationResult<()> {
        let mut edges = Vec::new();
        for node in nodes.values() {
            for (argument, dependency) in node.dependencies() {
                if !nodes.contains_key(dependency) {
                    return Err(TranslationError::UnresolvedDependency {
                        node_id: node.id().to_string(),
                        argument: argument.clone(),
                        missing_node: dependency.clone(),
                    });
                }
                edges.push((dependency.clone(), node.id().to_string()));
            }
        }

        for (dependency, dependent) in edges {
            if let Some(node) = nodes.get_mut(&dependency) {
                node.add_dependent(&dependent);
            }
        }

        Ok(())
    }

    /// Translate every sink, dependencies first, into one process chain.
    ///
    /// Sinks are processed in ascending id order and share one evaluation
    /// context, so the shared-dependency policy applies across sinks too.
    pub fn translate(
        &self,
        registry: &TranslatorRegistry,
        backend: &dyn BackendClient,
        options: &TranslationOptions,
    ) -> TranslationResult<ProcessChain> {
        let start_time = Instant::now();
        let mut ctx = TranslationContext::new(self, registry, backend, options);

        let mut commands = Vec::new();
        let mut sink_references = Vec::new();
        for sink in &self.sinks {
            let translation = ctx.evaluate(sink)?;
            commands.extend(translation.commands);
            sink_references.extend(translation.references);
        }

        let location = ctx.finish()?;

        TranslationCompleted {
            sink_count: self.sinks.len(),
            command_count: commands.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(ProcessChain {
            commands,
            sink_references,
            location,
        })
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// The node bound to argument `argument` of `node`.
    pub fn dependency_named(&self, node: &Node, argument: &str) -> Option<&Node> {
        node.dependency_named(argument)
            .and_then(|node_id| self.nodes.get(node_id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of nodes nothing depends on, ascending.
    pub fn sinks(&self) -> &[String] {
        &self.sinks
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }

    /// Default value declared for parameter `name`.
    pub fn parameter_default(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.default.as_ref())
    }
}
