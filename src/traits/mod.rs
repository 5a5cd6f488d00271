// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backend;
pub mod translator;

pub use backend::{BackendClient, BackendResponse};
pub use translator::{Translation, Translator};
