// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::TranslationContext;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::Node;
use crate::traits::{Translation, Translator};

/// Pass-through translator - emits no commands and re-exposes its `data` input.
///
/// Backs the operations that only matter to the backend's job handling, such as
/// `save_result` and `debug`.
pub struct PassThroughTranslator {
    process_id: &'static str,
    description: &'static str,
    string_arguments: &'static [&'static str],
}

impl PassThroughTranslator {
    /// `save_result`: the optional `format` must be a string.
    pub fn save_result() -> Self {
        Self {
            process_id: "save_result",
            description: "Marks the data as the job result; the output format is handled by the backend.",
            string_arguments: &["format"],
        }
    }

    pub fn debug() -> Self {
        Self {
            process_id: "debug",
            description: "Passes the data through unchanged.",
            string_arguments: &[],
        }
    }
}

impl Translator for PassThroughTranslator {
    fn process_id(&self) -> &'static str {
        self.process_id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
        for name in self.string_arguments {
            if let Some(value) = ctx.optional_argument(node, name)? {
                if !value.is_string() {
                    return Err(TranslationError::InvalidArgument {
                        argument: name.to_string(),
                        reason: format!("expected a string, found {}", value),
                    });
                }
            }
        }

        let inputs = ctx.evaluate_dependencies(node)?;
        let references = inputs.references("data")?.to_vec();
        Ok(Translation::after(inputs).with_references(references))
    }
}
