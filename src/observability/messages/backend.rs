// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for dataset metadata queries against the backend.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Dataset metadata requested from the backend.
///
/// # Log Level
/// `debug!` - Per-dataset detail
///
/// # Example
/// ```
/// use process_chain::observability::messages::backend::DatasetInfoRequested;
///
/// let msg = DatasetInfoRequested {
///     dataset: "nc_spm_08.PERMANENT.raster.elevation",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct DatasetInfoRequested<'a> {
    pub dataset: &'a str,
}

impl Display for DatasetInfoRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Requesting metadata for dataset '{}'", self.dataset)
    }
}

impl StructuredLog for DatasetInfoRequested<'_> {
    fn log(&self) {
        tracing::debug!(dataset = self.dataset, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("dataset_info", span_name = name, dataset = self.dataset)
    }
}

/// The backend answered a metadata request with a non-success status.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use process_chain::observability::messages::backend::DatasetInfoFailed;
///
/// let msg = DatasetInfoFailed {
///     dataset: "nc_spm_08.PERMANENT.raster.elevation",
///     status: 404,
///     message: "not found",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct DatasetInfoFailed<'a> {
    pub dataset: &'a str,
    pub status: u16,
    pub message: &'a str,
}

impl Display for DatasetInfoFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Metadata request for dataset '{}' failed with status {}: {}",
            self.dataset, self.status, self.message
        )
    }
}

impl StructuredLog for DatasetInfoFailed<'_> {
    fn log(&self) {
        tracing::error!(
            dataset = self.dataset,
            status = self.status,
            backend_message = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "dataset_info_failed",
            span_name = name,
            dataset = self.dataset,
            status = self.status,
        )
    }
}
