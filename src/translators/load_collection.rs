// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::TranslationContext;
use crate::errors::TranslationResult;
use crate::graph::{DatasetKind, DatasetReference, Node};
use crate::traits::{Translation, Translator};

/// Load collection translator - makes an existing dataset available to the graph.
///
/// Emits a metadata command for the dataset followed by a `g.region` command
/// aligning the computational region with it.
pub struct LoadCollectionTranslator;

impl Translator for LoadCollectionTranslator {
    fn process_id(&self) -> &'static str {
        "load_collection"
    }

    fn description(&self) -> &'static str {
        "Loads a raster, vector or space-time raster dataset identified by collection.namespace.kind.name."
    }

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
        let inputs = ctx.evaluate_dependencies(node)?;

        let reference = DatasetReference::decode(ctx.string_argument(node, "id")?)?;
        let kind = reference.require_kind()?;
        reference.require_location()?;
        ctx.record_location(&reference);

        let qualified = reference.qualified_name();
        let metadata = match kind {
            DatasetKind::Raster => ctx.command("r.info").input("map", &qualified),
            DatasetKind::Vector => ctx.command("v.info").input("map", &qualified),
            DatasetKind::Strds => ctx
                .command("t.info")
                .input("input", &qualified)
                .input("type", "strds"),
        }
        .flags("g");
        let region = ctx.command("g.region").input(kind.token(), &qualified).flags("g");

        let mut translation = Translation::after(inputs);
        translation.push(metadata);
        translation.push(region);
        translation.produce(reference);
        Ok(translation)
    }
}
