// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod argument;
mod command;
mod dataset;
mod node;
mod process_graph;
mod validation;

pub use argument::Argument;
pub use command::{Command, CommandParameter, ProcessChain};
pub use dataset::{DatasetKind, DatasetReference};
pub use node::Node;
pub use process_graph::{ParameterDeclaration, ProcessGraph};
