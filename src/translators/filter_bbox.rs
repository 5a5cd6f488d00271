// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::RESOLUTION_FIELD;
use crate::engine::TranslationContext;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::Node;
use crate::traits::{Translation, Translator};
use serde_json::Value;

/// Filter bbox translator - restricts the computational region to a bounding box.
///
/// The region keeps the resolution of the first input dataset, which is looked up
/// on the backend. Datasets computed earlier in the chain do not exist there yet,
/// so the lookup goes to the stored dataset they were derived from. A failed lookup
/// fails the translation.
pub struct FilterBboxTranslator;

/// West/east/north/south bounds of an `extent` argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub north: f64,
    pub south: f64,
}

impl BoundingBox {
    pub fn from_value(value: &Value) -> TranslationResult<Self> {
        let bound = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_f64)
                .ok_or_else(|| TranslationError::InvalidArgument {
                    argument: "extent".to_string(),
                    reason: format!("'{}' must be a number", name),
                })
        };

        let bbox = Self {
            west: bound("west")?,
            east: bound("east")?,
            north: bound("north")?,
            south: bound("south")?,
        };

        if bbox.west >= bbox.east || bbox.south >= bbox.north {
            return Err(TranslationError::InvalidArgument {
                argument: "extent".to_string(),
                reason: "west must be less than east and south less than north".to_string(),
            });
        }

        Ok(bbox)
    }
}

impl Translator for FilterBboxTranslator {
    fn process_id(&self) -> &'static str {
        "filter_bbox"
    }

    fn description(&self) -> &'static str {
        "Limits the data to a bounding box by setting the computational region at the data's resolution."
    }

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
        let inputs = ctx.evaluate_dependencies(node)?;

        let bbox = BoundingBox::from_value(ctx.required_argument(node, "extent")?)?;
        let references = inputs.references("data")?.to_vec();
        let first = references.first().ok_or_else(|| TranslationError::ArityMismatch {
            argument: "data".to_string(),
            expected: 1,
            found: 0,
        })?;

        let stored = first.stored();
        let info = ctx.dataset_info(stored)?;
        let resolution = info
            .get(RESOLUTION_FIELD)
            .and_then(Value::as_f64)
            .ok_or_else(|| TranslationError::MissingMetadata {
                dataset: stored.encode(),
                field: RESOLUTION_FIELD.to_string(),
            })?;

        for reference in &references {
            ctx.record_location(reference);
        }

        let region = ctx
            .command("g.region")
            .input("n", bbox.north.to_string())
            .input("s", bbox.south.to_string())
            .input("e", bbox.east.to_string())
            .input("w", bbox.west.to_string())
            .input("res", resolution.to_string());

        let mut translation = Translation::after(inputs).with_references(references);
        translation.push(region);
        Ok(translation)
    }
}
