// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-translation state.
//!
//! One context lives for exactly one [`ProcessGraph::translate`] call. It owns what
//! evaluation accumulates (produced references per node, the storage locations
//! read so far, the command id counter) and borrows the read-only collaborators.
//! Nothing here is shared between translations.
//!
//! [`ProcessGraph::translate`]: crate::graph::ProcessGraph::translate

use crate::config::TranslationOptions;
use crate::engine::TranslatorRegistry;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::{Argument, Command, DatasetReference, Node, ProcessGraph};
use crate::observability::messages::backend::{DatasetInfoFailed, DatasetInfoRequested};
use crate::observability::messages::StructuredLog;
use crate::traits::BackendClient;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

pub struct TranslationContext<'a> {
    pub(super) graph: &'a ProcessGraph,
    pub(super) registry: &'a TranslatorRegistry,
    pub(super) options: &'a TranslationOptions,
    pub(super) produced: HashMap<String, Vec<DatasetReference>>,
    backend: &'a dyn BackendClient,
    locations: BTreeSet<String>,
    command_counter: usize,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        graph: &'a ProcessGraph,
        registry: &'a TranslatorRegistry,
        backend: &'a dyn BackendClient,
        options: &'a TranslationOptions,
    ) -> Self {
        Self {
            graph,
            registry,
            options,
            produced: HashMap::new(),
            backend,
            locations: BTreeSet::new(),
            command_counter: 0,
        }
    }

    pub fn graph(&self) -> &'a ProcessGraph {
        self.graph
    }

    pub fn options(&self) -> &'a TranslationOptions {
        self.options
    }

    pub fn node(&self, node_id: &str) -> TranslationResult<&'a Node> {
        self.graph
            .node(node_id)
            .ok_or_else(|| TranslationError::MissingNode {
                node_id: node_id.to_string(),
            })
    }

    pub fn is_translated(&self, node_id: &str) -> bool {
        self.produced.contains_key(node_id)
    }

    /// References produced by an already translated node.
    pub fn produced_references(&self, node_id: &str) -> Option<&[DatasetReference]> {
        self.produced.get(node_id).map(Vec::as_slice)
    }

    /// The literal value of argument `name`, with parameter references resolved.
    ///
    /// A parameter resolves to the caller's binding first, then the graph's declared
    /// default. Node references are not values and are rejected.
    pub fn optional_argument<'n>(&self, node: &'n Node, name: &str) -> TranslationResult<Option<&'n Value>>
    where
        'a: 'n,
    {
        let options: &'a TranslationOptions = self.options;
        let graph: &'a ProcessGraph = self.graph;

        match node.argument(name) {
            None => Ok(None),
            Some(Argument::Literal(value)) => Ok(Some(value)),
            Some(Argument::ParamRef(parameter)) => options
                .parameters
                .get(parameter)
                .or_else(|| graph.parameter_default(parameter))
                .map(Some)
                .ok_or_else(|| TranslationError::UnboundParameter {
                    parameter: parameter.clone(),
                }),
            Some(Argument::NodeRef(node_id)) => Err(TranslationError::InvalidArgument {
                argument: name.to_string(),
                reason: format!("expected a value, found a reference to node '{}'", node_id),
            }),
        }
    }

    pub fn required_argument<'n>(&self, node: &'n Node, name: &str) -> TranslationResult<&'n Value>
    where
        'a: 'n,
    {
        self.optional_argument(node, name)?
            .ok_or_else(|| TranslationError::MissingArgument {
                argument: name.to_string(),
            })
    }

    pub fn string_argument<'n>(&self, node: &'n Node, name: &str) -> TranslationResult<&'n str>
    where
        'a: 'n,
    {
        self.required_argument(node, name)?
            .as_str()
            .ok_or_else(|| TranslationError::InvalidArgument {
                argument: name.to_string(),
                reason: "expected a string".to_string(),
            })
    }

    /// Note the storage location a consumed dataset lives in.
    pub fn record_location(&mut self, reference: &DatasetReference) {
        if let Some(collection) = reference.collection() {
            self.locations.insert(collection.to_string());
        }
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    /// A new command with an id unique within this translation.
    pub fn command(&mut self, module: &str) -> Command {
        self.command_counter += 1;
        let id = format!("{}_{}", module.replace('.', "_"), self.command_counter);
        Command::new(id, module)
    }

    /// Query the backend for a dataset's metadata; any non-success answer is an error.
    pub fn dataset_info(&self, reference: &DatasetReference) -> TranslationResult<Value> {
        let (collection, namespace) = reference.require_location()?;
        let dataset = reference.encode();

        DatasetInfoRequested { dataset: &dataset }.log();
        let response = self
            .backend
            .get_dataset_info(collection, namespace, reference.name());

        if !response.is_success() {
            let message = response.message();
            DatasetInfoFailed {
                dataset: &dataset,
                status: response.status,
                message: &message,
            }
            .log();
            return Err(TranslationError::BackendRequestFailed {
                dataset,
                status: response.status,
                message,
            });
        }

        Ok(response.body)
    }

    /// Close the translation: the single location read from, if any.
    pub fn finish(self) -> TranslationResult<Option<String>> {
        if self.locations.len() > 1 && !self.options.allow_mixed_locations {
            return Err(TranslationError::MixedLocations {
                locations: self.locations.into_iter().collect(),
            });
        }
        Ok(self.locations.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::StaticCatalog;
    use crate::graph::DatasetKind;
    use serde_json::json;

    fn graph() -> ProcessGraph {
        ProcessGraph::build(&json!({
            "parameters": [{"name": "start", "default": "2001-01-01"}, {"name": "end"}],
            "process_graph": {
                "load": {"process_id": "load_collection", "arguments": {"id": "nc_spm_08.PERMANENT.strds.lsat5_1987"}},
                "filter": {"process_id": "filter_temporal", "arguments": {
                    "data": {"from_node": "load"},
                    "start": {"from_parameter": "start"},
                    "end": {"from_parameter": "end"},
                    "bands": {"from_parameter": "bands"},
                    "extent": ["2001-01-01", null],
                    "label": 7
                }}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_argument_resolution() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let mut options = TranslationOptions::default();
        options.parameters.insert("end".to_string(), json!("2002-01-01"));
        let ctx = TranslationContext::new(&graph, &registry, &backend, &options);
        let node = graph.node("filter").unwrap();

        assert_eq!(ctx.required_argument(node, "extent").unwrap(), &json!(["2001-01-01", null]));
        assert_eq!(ctx.string_argument(node, "start").unwrap(), "2001-01-01");
        assert_eq!(ctx.string_argument(node, "end").unwrap(), "2002-01-01");
        assert_eq!(ctx.optional_argument(node, "absent").unwrap(), None);

        assert!(matches!(
            ctx.required_argument(node, "absent"),
            Err(TranslationError::MissingArgument { argument }) if argument == "absent"
        ));
        assert!(matches!(
            ctx.required_argument(node, "bands"),
            Err(TranslationError::UnboundParameter { parameter }) if parameter == "bands"
        ));
        assert!(matches!(
            ctx.required_argument(node, "data"),
            Err(TranslationError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ctx.string_argument(node, "label"),
            Err(TranslationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_caller_binding_overrides_default() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let mut options = TranslationOptions::default();
        options.parameters.insert("start".to_string(), json!("1999-06-01"));
        let ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        let node = graph.node("filter").unwrap();
        assert_eq!(ctx.string_argument(node, "start").unwrap(), "1999-06-01");
    }

    #[test]
    fn test_command_ids_are_sequential() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        assert_eq!(ctx.command("g.region").id, "g_region_1");
        assert_eq!(ctx.command("t.rast.mapcalc").id, "t_rast_mapcalc_2");
    }

    #[test]
    fn test_missing_node() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();
        let ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        assert!(matches!(
            ctx.node("ghost"),
            Err(TranslationError::MissingNode { node_id }) if node_id == "ghost"
        ));
    }

    #[test]
    fn test_locations_accumulate_per_context() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let options = TranslationOptions::default();

        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);
        ctx.record_location(&DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation"));
        ctx.record_location(&DatasetReference::new("nc_spm_08", "landsat", DatasetKind::Raster, "lsat7_2002_10"));
        assert_eq!(ctx.finish().unwrap(), Some("nc_spm_08".to_string()));

        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);
        ctx.record_location(&DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation"));
        ctx.record_location(&DatasetReference::new("ECAD", "PERMANENT", DatasetKind::Strds, "precipitation"));
        match ctx.finish() {
            Err(TranslationError::MixedLocations { locations }) => assert_eq!(locations, vec!["ECAD", "nc_spm_08"]),
            other => panic!("Expected MixedLocations, got {:?}", other),
        }

        let fresh = TranslationContext::new(&graph, &registry, &backend, &options);
        assert!(fresh.locations().is_empty());
    }

    #[test]
    fn test_mixed_locations_allowed_by_option() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let backend = StaticCatalog::new();
        let options = TranslationOptions {
            allow_mixed_locations: true,
            ..TranslationOptions::default()
        };

        let mut ctx = TranslationContext::new(&graph, &registry, &backend, &options);
        ctx.record_location(&DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation"));
        ctx.record_location(&DatasetReference::new("ECAD", "PERMANENT", DatasetKind::Strds, "precipitation"));
        assert_eq!(ctx.finish().unwrap(), Some("ECAD".to_string()));
    }

    #[test]
    fn test_dataset_info_propagates_failures() {
        let graph = graph();
        let registry = TranslatorRegistry::new();
        let mut backend = StaticCatalog::new();
        let elevation = DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "elevation");
        backend.insert(&elevation, json!({"nsres": 10.0}));
        let options = TranslationOptions::default();
        let ctx = TranslationContext::new(&graph, &registry, &backend, &options);

        assert_eq!(ctx.dataset_info(&elevation).unwrap(), json!({"nsres": 10.0}));

        let missing = DatasetReference::new("nc_spm_08", "PERMANENT", DatasetKind::Raster, "slope");
        match ctx.dataset_info(&missing) {
            Err(TranslationError::BackendRequestFailed { dataset, status, .. }) => {
                assert_eq!(dataset, "nc_spm_08.PERMANENT.raster.slope");
                assert_eq!(status, 404);
            }
            other => panic!("Expected BackendRequestFailed, got {:?}", other),
        }

        let plain = DatasetReference::decode("slope").unwrap();
        assert!(matches!(
            ctx.dataset_info(&plain),
            Err(TranslationError::UnresolvedReference { .. })
        ));
    }
}
