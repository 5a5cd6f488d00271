// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // dataset metadata sources
pub mod config;     // config + runtime
pub mod engine;     // registry, context and dispatch
pub mod errors;     // error handling
pub mod graph;      // process graph model
pub mod observability;
pub mod traits;     // translator and backend contracts
pub mod translators; // built-in operation translators
