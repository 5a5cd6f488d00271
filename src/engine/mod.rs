// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod context;
pub mod dispatch;
pub mod registry;

pub use context::TranslationContext;
pub use dispatch::Dependencies;
pub use registry::TranslatorRegistry;
