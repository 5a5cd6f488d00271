// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backend client implementations.
//!
//! The translation core talks to the remote geoprocessing service only through
//! [`BackendClient`](crate::traits::BackendClient), and only from inside the
//! translators that need dataset metadata.
//!
//! # Available Backends
//!
//! ## Static Catalog
//! An in-memory table of dataset metadata, usually populated from the `catalog`
//! section of the configuration:
//! - **Lookups**: keyed by collection, namespace and dataset name
//! - **Misses**: answered with status 404, as the remote service would
//! - **Use Case**: offline translation, tests, demos
//!
//! # Example
//! ```rust
//! use process_chain::backends::StaticCatalog;
//! use process_chain::graph::{DatasetKind, DatasetReference};
//! use process_chain::traits::BackendClient;
//! use serde_json::json;
//!
//! let mut catalog = StaticCatalog::new();
//! let elevation = DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation");
//! catalog.insert(&elevation, json!({"nsres": 10.0}));
//!
//! let response = catalog.get_dataset_info("nc_spm_08", "PERMANENT", "elevation");
//! assert!(response.is_success());
//! ```

pub mod static_catalog;

pub use static_catalog::StaticCatalog;
