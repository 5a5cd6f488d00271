// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for process graph construction.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Process graph built and validated.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use process_chain::observability::messages::graph::GraphBuilt;
///
/// let msg = GraphBuilt {
///     title: None,
///     node_count: 3,
///     sink_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct GraphBuilt<'a> {
    pub title: Option<&'a str>,
    pub node_count: usize,
    pub sink_count: usize,
}

impl Display for GraphBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built process graph '{}': {} nodes, {} sinks",
            self.title.unwrap_or("untitled"),
            self.node_count,
            self.sink_count
        )
    }
}

impl StructuredLog for GraphBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            title = self.title,
            node_count = self.node_count,
            sink_count = self.sink_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_built",
            span_name = name,
            title = self.title,
            node_count = self.node_count,
            sink_count = self.sink_count,
        )
    }
}

/// A node is flagged as the result but other nodes consume its output.
///
/// Sinks are determined by the absence of dependents, so the flag is ignored.
///
/// # Log Level
/// `warn!` - Suspicious description, translation continues
pub struct ResultFlagMismatch<'a> {
    pub node_id: &'a str,
    pub dependent_count: usize,
}

impl Display for ResultFlagMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' is marked as result but has {} dependents; it is not treated as a sink",
            self.node_id, self.dependent_count
        )
    }
}

impl StructuredLog for ResultFlagMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            dependent_count = self.dependent_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "result_flag_mismatch",
            span_name = name,
            node_id = self.node_id,
            dependent_count = self.dependent_count,
        )
    }
}
