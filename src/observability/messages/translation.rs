// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for node evaluation and the translation lifecycle.
//!
//! This module contains message types for logging events related to:
//! * Node evaluation (start, completion, failure)
//! * Reuse of already translated shared dependencies
//! * Completion of a whole graph translation

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Translation of a node started.
///
/// # Log Level
/// `debug!` - Per-node detail
///
/// # Example
/// ```
/// use process_chain::observability::messages::translation::NodeEvaluationStarted;
///
/// let msg = NodeEvaluationStarted {
///     node_id: "load",
///     process_id: "load_collection",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct NodeEvaluationStarted<'a> {
    pub node_id: &'a str,
    pub process_id: &'a str,
}

impl Display for NodeEvaluationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Translating node '{}' ({})", self.node_id, self.process_id)
    }
}

impl StructuredLog for NodeEvaluationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            process_id = self.process_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_evaluation",
            span_name = name,
            node_id = self.node_id,
            process_id = self.process_id,
        )
    }
}

/// Translation of a node completed.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct NodeEvaluationCompleted<'a> {
    pub node_id: &'a str,
    pub process_id: &'a str,
    pub reference_count: usize,
    pub command_count: usize,
}

impl Display for NodeEvaluationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Translated node '{}' ({}): {} references, {} commands",
            self.node_id, self.process_id, self.reference_count, self.command_count
        )
    }
}

impl StructuredLog for NodeEvaluationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            process_id = self.process_id,
            reference_count = self.reference_count,
            command_count = self.command_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_evaluation_completed",
            span_name = name,
            node_id = self.node_id,
            process_id = self.process_id,
            command_count = self.command_count,
        )
    }
}

/// A shared dependency was already translated; its references are reused.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct NodeReused<'a> {
    pub node_id: &'a str,
    pub reference_count: usize,
}

impl Display for NodeReused<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reusing {} references of already translated node '{}'",
            self.reference_count, self.node_id
        )
    }
}

impl StructuredLog for NodeReused<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            reference_count = self.reference_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("node_reused", span_name = name, node_id = self.node_id)
    }
}

/// Translation of a node failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use process_chain::observability::messages::translation::NodeEvaluationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = NodeEvaluationFailed {
///     node_id: "bbox",
///     process_id: "filter_bbox",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct NodeEvaluationFailed<'a> {
    pub node_id: &'a str,
    pub process_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for NodeEvaluationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Translation of node '{}' ({}) failed: {}",
            self.node_id, self.process_id, self.error
        )
    }
}

impl StructuredLog for NodeEvaluationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            process_id = self.process_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "node_evaluation_failed",
            span_name = name,
            node_id = self.node_id,
            process_id = self.process_id,
            error = %self.error,
        )
    }
}

/// A whole graph was translated into a process chain.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use process_chain::observability::messages::translation::TranslationCompleted;
/// use std::time::Duration;
///
/// let msg = TranslationCompleted {
///     sink_count: 1,
///     command_count: 5,
///     duration: Duration::from_millis(2),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TranslationCompleted {
    pub sink_count: usize,
    pub command_count: usize,
    pub duration: std::time::Duration,
}

impl Display for TranslationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Translated {} sinks into {} commands in {:?}",
            self.sink_count, self.command_count, self.duration
        )
    }
}

impl StructuredLog for TranslationCompleted {
    fn log(&self) {
        tracing::info!(
            sink_count = self.sink_count,
            command_count = self.command_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "translation_completed",
            span_name = name,
            sink_count = self.sink_count,
            command_count = self.command_count,
            duration = ?self.duration,
        )
    }
}
