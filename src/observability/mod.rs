// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for the diagnostic and
//! operational logging of graph construction and translation. Message types
//! follow a struct-based pattern with a `Display` implementation, so log text is
//! defined once next to the fields it reports.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::graph` - process graph construction events
//! * `messages::translation` - node evaluation and translation lifecycle events
//! * `messages::backend` - dataset metadata queries
//!
//! # Usage
//!
//! ```rust
//! use process_chain::observability::messages::translation::NodeEvaluationFailed;
//! use process_chain::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! let msg = NodeEvaluationFailed {
//!     node_id: "ndvi",
//!     process_id: "normalized_difference",
//!     error: &error,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
