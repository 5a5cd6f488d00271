// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in operation translators.
//!
//! Each module holds one translator type registered under one process id:
//! - `load_collection` -> [`LoadCollectionTranslator`]
//! - `filter_bbox` -> [`FilterBboxTranslator`]
//! - `filter_temporal` -> [`FilterTemporalTranslator`]
//! - `normalized_difference` -> [`NormalizedDifferenceTranslator`]
//! - `save_result`, `debug` -> [`PassThroughTranslator`]

pub mod filter_bbox;
pub mod filter_temporal;
pub mod load_collection;
pub mod normalized_difference;
pub mod pass_through;

pub use filter_bbox::FilterBboxTranslator;
pub use filter_temporal::FilterTemporalTranslator;
pub use load_collection::LoadCollectionTranslator;
pub use normalized_difference::NormalizedDifferenceTranslator;
pub use pass_through::PassThroughTranslator;

use crate::graph::DatasetReference;
use crate::traits::Translator;
use std::sync::Arc;

/// One instance of every built-in translator.
pub fn builtin_translators() -> Vec<Arc<dyn Translator>> {
    vec![
        Arc::new(LoadCollectionTranslator),
        Arc::new(FilterBboxTranslator),
        Arc::new(FilterTemporalTranslator),
        Arc::new(NormalizedDifferenceTranslator),
        Arc::new(PassThroughTranslator::save_result()),
        Arc::new(PassThroughTranslator::debug()),
    ]
}

/// Name of a dataset derived from `source` by `process_id`.
pub(crate) fn derived_name(source: &DatasetReference, process_id: &str) -> String {
    format!("{}_{}", source.name(), process_id)
}
