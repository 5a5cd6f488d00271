// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recursive, depth-first evaluation of a node's dependency subgraph.
//!
//! The dispatcher does not evaluate dependencies up front: a translator asks for
//! them through [`TranslationContext::evaluate_dependencies`] and seeds its own
//! result with their commands via [`Translation::after`]. The net effect is that
//! every node's commands follow the commands of everything it depends on.
//!
//! # Shared dependencies
//!
//! Under [`SharedDependencyPolicy::Reuse`] a node that was already translated is
//! not translated again: evaluating it returns its stored references and no
//! commands, so a node reached along several paths (a diamond, or both inputs of
//! a self-paired operation) appears once in the chain. Under
//! [`SharedDependencyPolicy::Reevaluate`] the translator runs once per path and
//! its commands repeat.

use crate::config::SharedDependencyPolicy;
use crate::engine::TranslationContext;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::{Command, DatasetReference, Node};
use crate::observability::messages::translation::{
    NodeEvaluationCompleted, NodeEvaluationFailed, NodeEvaluationStarted, NodeReused,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Translation;

/// The evaluated inputs of one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dependencies {
    commands: Vec<Command>,
    inputs: Vec<(String, Vec<DatasetReference>)>,
}

impl Dependencies {
    /// References produced by the node bound to `argument`.
    pub fn references(&self, argument: &str) -> TranslationResult<&[DatasetReference]> {
        self.inputs
            .iter()
            .find(|(name, _)| name == argument)
            .map(|(_, references)| references.as_slice())
            .ok_or_else(|| TranslationError::MissingArgument {
                argument: argument.to_string(),
            })
    }

    /// The one reference produced for `argument`.
    pub fn single(&self, argument: &str) -> TranslationResult<&DatasetReference> {
        match self.references(argument)? {
            [reference] => Ok(reference),
            references => Err(TranslationError::ArityMismatch {
                argument: argument.to_string(),
                expected: 1,
                found: references.len(),
            }),
        }
    }

    /// Every input reference, in argument order.
    #[cfg(test)]
    pub(crate) fn all_references(&self) -> impl Iterator<Item = &DatasetReference> {
        self.inputs.iter().flat_map(|(_, references)| references.iter())
    }

    pub(crate) fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

impl<'a> TranslationContext<'a> {
    /// Evaluate one node: its translator, and through it, its dependencies.
    pub fn evaluate(&mut self, node_id: &str) -> TranslationResult<Translation> {
        let node = self.node(node_id)?;

        if self.options.shared_dependencies == SharedDependencyPolicy::Reuse {
            if let Some(references) = self.produced.get(node_id) {
                NodeReused {
                    node_id,
                    reference_count: references.len(),
                }
                .log();
                return Ok(Translation::reused(references.clone()));
            }
        }

        let registry = self.registry;
        let translator = registry.resolve(node)?;

        let started = NodeEvaluationStarted {
            node_id,
            process_id: node.process_id(),
        };
        let span = started.span("node_evaluation");
        let _guard = span.enter();
        started.log();

        let translation = translator.translate(node, self).map_err(|error| {
            // raised further down and already reported there
            if error.is_attributed() {
                return error;
            }
            NodeEvaluationFailed {
                node_id,
                process_id: node.process_id(),
                error: &error,
            }
            .log();
            error.attributed_to(node_id)
        })?;

        self.produced
            .insert(node_id.to_string(), translation.references.clone());

        NodeEvaluationCompleted {
            node_id,
            process_id: node.process_id(),
            reference_count: translation.references.len(),
            command_count: translation.commands.len(),
        }
        .log();

        Ok(translation)
    }

    /// Evaluate every dependency of `node` in argument order.
    pub fn evaluate_dependencies(&mut self, node: &Node) -> TranslationResult<Dependencies> {
        let mut dependencies = Dependencies::default();

        for (argument, dependency_id) in node.dependencies() {
            let translation = self.evaluate(dependency_id)?;
            dependencies.commands.extend(translation.commands);
            dependencies
                .inputs
                .push((argument.clone(), translation.references));
        }

        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::StaticCatalog;
    use crate::config::TranslationOptions;
    use crate::engine::TranslatorRegistry;
    use crate::graph::{DatasetKind, ProcessGraph};
    use crate::traits::Translator;
    use serde_json::json;
    use std::sync::Arc;

    /// Emits one `echo` command and one reference named after its node.
    struct Echo;

    impl Translator for Echo {
        fn process_id(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Test translator"
        }

        fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
            let inputs = ctx.evaluate_dependencies(node)?;
            let mut translation = Translation::after(inputs);
            let command = ctx.command("echo").input("node", node.id());
            translation.push(command);
            translation.produce(DatasetReference::derived(None, DatasetKind::Raster, node.id()));
            Ok(translation)
        }
    }

    /// Fails unless argument `required` is present.
    struct Strict;

    impl Translator for Strict {
        fn process_id(&self) -> &'static str {
            "strict"
        }

        fn description(&self) -> &'static str {
            "Test translator"
        }

        fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
            let inputs = ctx.evaluate_dependencies(node)?;
            ctx.required_argument(node, "required")?;
            Ok(Translation::after(inputs))
        }
    }

    fn registry() -> TranslatorRegistry {
        let mut registry = TranslatorRegistry::new();
        registry.register(Arc::new(Echo));
        registry.register(Arc::new(Strict));
        registry
    }

    fn echoed(translation: &Translation) -> Vec<&str> {
        translation
            .commands
            .iter()
            .filter_map(|c| c.input_value("node"))
            .collect()
    }

    #[test]
    fn test_dependencies_precede_node_in_argument_order() {
        let graph = ProcessGraph::build(&json!({
            "top": {"process_id": "echo", "arguments": {"b": {"from_node": "second"}, "a": {"from_node": "first"}}},
            "first": {"process_id": "echo"},
            "second": {"process_id": "echo"}
        }))
        .unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        let translation = ctx.evaluate("top").unwrap();

        assert_eq!(echoed(&translation), vec!["second", "first", "top"]);
        assert_eq!(translation.references.len(), 1);
        assert_eq!(translation.references[0].name(), "top");
        assert!(ctx.is_translated("first"));
        assert_eq!(ctx.produced_references("second").map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_self_paired_dependency_evaluated_once_under_reuse() {
        let graph = ProcessGraph::build(&json!({
            "pair": {"process_id": "echo", "arguments": {"x": {"from_node": "leaf"}, "y": {"from_node": "leaf"}}},
            "leaf": {"process_id": "echo"}
        }))
        .unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        let translation = ctx.evaluate("pair").unwrap();
        assert_eq!(echoed(&translation), vec!["leaf", "pair"]);
    }

    #[test]
    fn test_self_paired_dependency_repeated_under_reevaluate() {
        let graph = ProcessGraph::build(&json!({
            "pair": {"process_id": "echo", "arguments": {"x": {"from_node": "leaf"}, "y": {"from_node": "leaf"}}},
            "leaf": {"process_id": "echo"}
        }))
        .unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions {
            shared_dependencies: SharedDependencyPolicy::Reevaluate,
            ..TranslationOptions::default()
        };
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        let translation = ctx.evaluate("pair").unwrap();
        assert_eq!(echoed(&translation), vec!["leaf", "leaf", "pair"]);
    }

    #[test]
    fn test_unknown_operation() {
        let graph = ProcessGraph::build(&json!({
            "top": {"process_id": "echo", "arguments": {"data": {"from_node": "odd"}}},
            "odd": {"process_id": "aggregate_spatial"}
        }))
        .unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        match ctx.evaluate("top") {
            Err(TranslationError::UnsupportedOperation { node_id, process_id, known }) => {
                assert_eq!(node_id, "odd");
                assert_eq!(process_id, "aggregate_spatial");
                assert_eq!(known, vec!["echo", "strict"]);
            }
            other => panic!("Expected UnsupportedOperation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_node() {
        let graph = ProcessGraph::build(&json!({"leaf": {"process_id": "echo"}})).unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        assert!(matches!(ctx.evaluate("ghost"), Err(TranslationError::MissingNode { .. })));
    }

    #[test]
    fn test_translator_error_attributed_to_failing_node() {
        let graph = ProcessGraph::build(&json!({
            "top": {"process_id": "echo", "arguments": {"data": {"from_node": "check"}}},
            "check": {"process_id": "strict"}
        }))
        .unwrap();
        let registry = registry();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        match ctx.evaluate("top") {
            Err(TranslationError::TranslationFailed { node_id, source }) => {
                assert_eq!(node_id, "check");
                assert!(matches!(*source, TranslationError::MissingArgument { ref argument } if argument == "required"));
            }
            other => panic!("Expected TranslationFailed, got {:?}", other),
        }
        assert!(!ctx.is_translated("check"));
        assert!(!ctx.is_translated("top"));
    }

    #[test]
    fn test_dependencies_accessors() {
        let reference = DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation");
        let dependencies = Dependencies {
            commands: vec![],
            inputs: vec![
                ("data".to_string(), vec![reference.clone()]),
                ("mask".to_string(), vec![]),
                ("pair".to_string(), vec![reference.clone(), reference.clone()]),
            ],
        };

        assert_eq!(dependencies.single("data").unwrap(), &reference);
        assert_eq!(dependencies.all_references().count(), 3);
        assert!(matches!(
            dependencies.single("mask"),
            Err(TranslationError::ArityMismatch { expected: 1, found: 0, .. })
        ));
        assert!(matches!(
            dependencies.single("pair"),
            Err(TranslationError::ArityMismatch { expected: 1, found: 2, .. })
        ));
        assert!(matches!(
            dependencies.references("other"),
            Err(TranslationError::MissingArgument { .. })
        ));
    }
}
