// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] for emitting it with its fields attached.
//!
//! # Organization
//!
//! * `graph` - process graph construction events
//! * `translation` - node evaluation and translation lifecycle events
//! * `backend` - dataset metadata queries
//!
//! # Usage Pattern
//!
//! ```rust
//! use process_chain::observability::messages::graph::GraphBuilt;
//!
//! let msg = GraphBuilt {
//!     title: Some("NDVI"),
//!     node_count: 5,
//!     sink_count: 1,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod backend;
pub mod graph;
pub mod translation;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as an event at its level.
    fn log(&self);

    /// A span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
