// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod translation;

pub use config::ConfigError;
pub use translation::{TranslationError, TranslationResult};
