// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while building a process graph or translating it into a process chain.
//!
//! Construction and dispatch never recover from any of these: the first error
//! encountered aborts the translation and no partial chain is returned.

use thiserror::Error;

/// Everything that can go wrong between a client's graph description and the
/// finished command list.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The description carries no process-graph mapping, or the mapping is empty.
    #[error("process graph is empty or missing")]
    EmptyGraph,

    /// The description is not shaped like a process graph at all.
    #[error("invalid process graph description: {reason}")]
    InvalidDescription { reason: String },

    /// A node description has no `process_id`.
    #[error("node '{node_id}' has no process_id")]
    MissingOperationId { node_id: String },

    /// An argument references a node id that is not part of the graph.
    #[error("node '{node_id}' argument '{argument}' references unknown node '{missing_node}'")]
    UnresolvedDependency {
        node_id: String,
        argument: String,
        missing_node: String,
    },

    /// Node references form a cycle, listed as `a -> b -> a`.
    #[error("cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Evaluation was asked for a node the graph does not contain.
    #[error("node '{node_id}' does not exist in the process graph")]
    MissingNode { node_id: String },

    /// No translator is registered for the node's operation id.
    #[error("node '{node_id}': unsupported process '{process_id}' (known processes: {})", known.join(", "))]
    UnsupportedOperation {
        node_id: String,
        process_id: String,
        known: Vec<String>,
    },

    /// A required argument is absent, or does not reference a node where one is expected.
    #[error("missing argument '{argument}'")]
    MissingArgument { argument: String },

    /// A literal argument has the wrong shape.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// A `from_parameter` reference has neither a caller binding nor a default.
    #[error("parameter '{parameter}' is not bound")]
    UnboundParameter { parameter: String },

    /// A dependency produced a different number of dataset references than the operation accepts.
    #[error("argument '{argument}' must resolve to {expected} dataset reference(s), found {found}")]
    ArityMismatch {
        argument: String,
        expected: usize,
        found: usize,
    },

    /// An encoded dataset reference names a kind that does not exist.
    #[error("malformed dataset reference '{reference}': unknown kind '{kind}'")]
    MalformedReference { reference: String, kind: String },

    /// A reference decoded from a plain name was used where its kind or location is needed.
    #[error("dataset reference '{reference}' is not fully qualified (expected collection.namespace.kind.name)")]
    UnresolvedReference { reference: String },

    /// An input dataset has a kind the operation cannot consume.
    #[error("dataset '{reference}' cannot be used here, expected {expected}")]
    IncompatibleDataset { reference: String, expected: String },

    /// The backend answered a metadata query with a non-success status.
    #[error("backend request for dataset '{dataset}' failed with status {status}: {message}")]
    BackendRequestFailed {
        dataset: String,
        status: u16,
        message: String,
    },

    /// The backend's metadata answer lacks a field the operation depends on.
    #[error("backend metadata for dataset '{dataset}' has no '{field}'")]
    MissingMetadata { dataset: String, field: String },

    /// The graph reads datasets from more than one storage location.
    #[error("process graph spans multiple locations: {}", locations.join(", "))]
    MixedLocations { locations: Vec<String> },

    /// A translator body failed; `node_id` names the node being translated.
    #[error("translation of node '{node_id}' failed: {source}")]
    TranslationFailed {
        node_id: String,
        #[source]
        source: Box<TranslationError>,
    },
}

impl TranslationError {
    /// Whether the error already names the node it belongs to.
    pub fn is_attributed(&self) -> bool {
        matches!(
            self,
            TranslationError::TranslationFailed { .. }
                | TranslationError::UnsupportedOperation { .. }
                | TranslationError::MissingNode { .. }
        )
    }

    /// Attach `node_id` unless the error is already attributed to a node.
    pub fn attributed_to(self, node_id: &str) -> Self {
        if self.is_attributed() {
            self
        } else {
            TranslationError::TranslationFailed {
                node_id: node_id.to_string(),
                source: Box::new(self),
            }
        }
    }

    /// The innermost error, looking through `TranslationFailed` wrappers.
    pub fn root_cause(&self) -> &TranslationError {
        match self {
            TranslationError::TranslationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result alias used throughout graph construction and translation.
pub type TranslationResult<T> = Result<T, TranslationError>;
