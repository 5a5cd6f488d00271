// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Dependencies, TranslationContext};
use crate::errors::TranslationResult;
use crate::graph::{Command, DatasetReference, Node};

/// Translates one operation into backend commands.
///
/// A translator reads its arguments from the node it is given, asks the context to
/// evaluate the node's dependencies before building its own commands, and reads
/// nothing of other nodes besides the references their evaluation produced.
///
/// # Example
/// ```
/// use process_chain::engine::TranslationContext;
/// use process_chain::errors::TranslationResult;
/// use process_chain::graph::Node;
/// use process_chain::traits::{Translation, Translator};
///
/// struct Passthrough;
///
/// impl Translator for Passthrough {
///     fn process_id(&self) -> &'static str { "passthrough" }
///     fn description(&self) -> &'static str { "Hands its input through." }
///
///     fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
///         let inputs = ctx.evaluate_dependencies(node)?;
///         let references = inputs.references("data")?.to_vec();
///         Ok(Translation::after(inputs).with_references(references))
///     }
/// }
/// ```
pub trait Translator: Send + Sync {
    /// The operation id this translator is registered under.
    fn process_id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation>;
}

/// What evaluating one node yields: the references it makes available to its
/// dependents and the commands to run, dependencies first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub references: Vec<DatasetReference>,
    pub commands: Vec<Command>,
}

impl Translation {
    /// Start from the already scheduled commands of a node's dependencies.
    pub fn after(dependencies: Dependencies) -> Self {
        Self {
            references: Vec::new(),
            commands: dependencies.into_commands(),
        }
    }

    /// A node that was translated before: its references, nothing new to run.
    pub fn reused(references: Vec<DatasetReference>) -> Self {
        Self {
            references,
            commands: Vec::new(),
        }
    }

    pub fn with_references(mut self, references: Vec<DatasetReference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn produce(&mut self, reference: DatasetReference) {
        self.references.push(reference);
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}
