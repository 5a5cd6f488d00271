// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{TranslationError, TranslationResult};
use crate::graph::Argument;
use serde_json::Value;
use std::collections::BTreeSet;

const PROCESS_ID_KEY: &str = "process_id";
const ARGUMENTS_KEY: &str = "arguments";
const RESULT_KEY: &str = "result";
const DESCRIPTION_KEY: &str = "description";

/// One operation call in a process graph.
///
/// Edges point from a consumer to what it consumes: `dependencies` holds the
/// `(argument name, node id)` pairs this node reads from, `dependents` the ids of
/// nodes reading from this one. The graph keeps the two sides inverse to each other.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    process_id: String,
    arguments: Vec<(String, Argument)>,
    dependencies: Vec<(String, String)>,
    dependents: BTreeSet<String>,
    result: bool,
    description: Option<String>,
}

impl Node {
    /// Build a node from its raw description object.
    ///
    /// # Example
    /// ```
    /// use process_chain::graph::Node;
    /// use serde_json::json;
    ///
    /// let node = Node::from_description("ndvi", &json!({
    ///     "process_id": "normalized_difference",
    ///     "arguments": { "x": {"from_node": "nir"}, "y": {"from_node": "red"} }
    /// })).unwrap();
    ///
    /// assert_eq!(node.dependency_named("y"), Some("red"));
    /// ```
    pub fn from_description(id: &str, description: &Value) -> TranslationResult<Self> {
        let object = description
            .as_object()
            .ok_or_else(|| TranslationError::InvalidDescription {
                reason: format!("node '{}' is not an object", id),
            })?;

        let process_id = object
            .get(PROCESS_ID_KEY)
            .and_then(Value::as_str)
            .filter(|process_id| !process_id.is_empty())
            .ok_or_else(|| TranslationError::MissingOperationId {
                node_id: id.to_string(),
            })?;

        let arguments = match object.get(ARGUMENTS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(name, value)| (name.clone(), Argument::from_value(value.clone())))
                .collect(),
            Some(_) => {
                return Err(TranslationError::InvalidDescription {
                    reason: format!("arguments of node '{}' must be an object", id),
                })
            }
        };

        let mut node = Self {
            id: id.to_string(),
            process_id: process_id.to_string(),
            arguments,
            dependencies: Vec::new(),
            dependents: BTreeSet::new(),
            result: object.get(RESULT_KEY).and_then(Value::as_bool).unwrap_or(false),
            description: object
                .get(DESCRIPTION_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        node.compute_dependencies();
        Ok(node)
    }

    /// Record every argument that references another node, in argument order.
    ///
    /// Ids are not resolved here; the graph does that once every node exists.
    pub fn compute_dependencies(&mut self) {
        self.dependencies = self
            .arguments
            .iter()
            .filter_map(|(name, argument)| {
                argument
                    .node_ref()
                    .map(|node_id| (name.clone(), node_id.to_string()))
            })
            .collect();
    }

    /// Id of the node bound to argument `name`, if that argument is a node reference.
    pub fn dependency_named(&self, name: &str) -> Option<&str> {
        self.dependencies
            .iter()
            .find(|(argument, _)| argument == name)
            .map(|(_, node_id)| node_id.as_str())
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|(argument, _)| argument == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn add_dependent(&mut self, node_id: &str) {
        self.dependents.insert(node_id.to_string());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn arguments(&self) -> &[(String, Argument)] {
        &self.arguments
    }

    pub fn dependencies(&self) -> &[(String, String)] {
        &self.dependencies
    }

    pub fn dependents(&self) -> &BTreeSet<String> {
        &self.dependents
    }

    /// The `result` flag the client set on this node.
    pub fn is_result(&self) -> bool {
        self.result
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
