// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backend commands and the process chain they are assembled into.
//!
//! The core never interprets a command; translators build them and the
//! dispatcher only concatenates.

use crate::config::consts::PROCESS_CHAIN_VERSION;
use crate::graph::DatasetReference;
use serde::Serialize;
use serde_json::{json, Value};

/// A `{param, value}` pair of a backend command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandParameter {
    pub param: String,
    pub value: String,
}

/// One backend command, e.g. a `g.region` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub id: String,
    pub module: String,
    pub inputs: Vec<CommandParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<CommandParameter>,
}

impl Command {
    pub fn new(id: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module: module.into(),
            inputs: Vec::new(),
            flags: None,
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push(CommandParameter {
            param: param.into(),
            value: value.into(),
        });
        self
    }

    pub fn output(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push(CommandParameter {
            param: param.into(),
            value: value.into(),
        });
        self
    }

    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Value of the input named `param`.
    pub fn input_value(&self, param: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|p| p.param == param)
            .map(|p| p.value.as_str())
    }
}

/// The full translation result of a process graph.
#[derive(Debug, Clone)]
pub struct ProcessChain {
    /// Commands in execution order, dependencies first.
    pub commands: Vec<Command>,
    /// References produced by the sink nodes, in sink order.
    pub sink_references: Vec<DatasetReference>,
    /// The storage location every input was read from, when any was.
    pub location: Option<String>,
}

impl ProcessChain {
    /// The `{"version": ..., "list": [...]}` document the backend accepts.
    pub fn to_document(&self) -> Value {
        json!({
            "version": PROCESS_CHAIN_VERSION,
            "list": self.commands,
        })
    }

    pub fn modules(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.module.as_str()).collect()
    }
}
