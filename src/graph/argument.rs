// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

const FROM_NODE: &str = "from_node";
const FROM_PARAMETER: &str = "from_parameter";

/// One argument of a node, decoded once when the node is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Any JSON value passed through as-is.
    Literal(Value),
    /// `{"from_node": "<node-id>"}`: the output of another node.
    NodeRef(String),
    /// `{"from_parameter": "<name>"}`: a graph-level input parameter.
    ParamRef(String),
}

impl Argument {
    /// Only single-key objects whose value is a string count as references.
    pub fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(id)) = map.get(FROM_NODE) {
                    return Argument::NodeRef(id.clone());
                }
                if let Some(Value::String(name)) = map.get(FROM_PARAMETER) {
                    return Argument::ParamRef(name.clone());
                }
            }
        }
        Argument::Literal(value)
    }

    pub fn node_ref(&self) -> Option<&str> {
        match self {
            Argument::NodeRef(id) => Some(id),
            _ => None,
        }
    }
}
