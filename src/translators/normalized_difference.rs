// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::NDVI_COLOR_TABLE;
use crate::engine::TranslationContext;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::{DatasetKind, DatasetReference, Node};
use crate::traits::{Translation, Translator};
use crate::translators::derived_name;

const PROCESS_ID: &str = "normalized_difference";

/// Normalized difference translator - computes `(x - y) / (x + y)`.
///
/// Both operands must be single datasets of the same kind. Rasters are combined
/// with `r.mapcalc`, space-time series with `t.rast.mapcalc`. The result gets the
/// NDVI color table.
pub struct NormalizedDifferenceTranslator;

fn expression(output: &str, x: &str, y: &str) -> String {
    format!("{output} = float({x} - {y}) / float({x} + {y})")
}

impl Translator for NormalizedDifferenceTranslator {
    fn process_id(&self) -> &'static str {
        PROCESS_ID
    }

    fn description(&self) -> &'static str {
        "Computes the normalized difference (x - y) / (x + y) of two rasters or space-time raster series."
    }

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
        let inputs = ctx.evaluate_dependencies(node)?;

        let x = inputs.single("x")?.clone();
        let y = inputs.single("y")?.clone();

        let kind = x.require_kind()?;
        if kind == DatasetKind::Vector {
            return Err(TranslationError::IncompatibleDataset {
                reference: x.encode(),
                expected: "raster or strds".to_string(),
            });
        }
        if y.require_kind()? != kind {
            return Err(TranslationError::IncompatibleDataset {
                reference: y.encode(),
                expected: kind.to_string(),
            });
        }
        ctx.record_location(&x);
        ctx.record_location(&y);

        let output = DatasetReference::derived_from(&x, kind, derived_name(&x, PROCESS_ID));
        let (x_name, y_name, output_name) = (x.qualified_name(), y.qualified_name(), output.qualified_name());

        let mut translation = Translation::after(inputs);
        match kind {
            DatasetKind::Strds => {
                let mapcalc = ctx
                    .command("t.rast.mapcalc")
                    .input("inputs", format!("{},{}", x_name, y_name))
                    .input("expression", expression(&output_name, &x_name, &y_name))
                    .input("basename", output.name())
                    .output("output", output_name.as_str());
                let colors = ctx
                    .command("t.rast.colors")
                    .input("input", output_name.as_str())
                    .input("color", NDVI_COLOR_TABLE);
                translation.push(mapcalc);
                translation.push(colors);
            }
            _ => {
                let mapcalc = ctx
                    .command("r.mapcalc")
                    .input("expression", expression(&output_name, &x_name, &y_name));
                let colors = ctx
                    .command("r.colors")
                    .input("map", output_name.as_str())
                    .input("color", NDVI_COLOR_TABLE);
                translation.push(mapcalc);
                translation.push(colors);
            }
        }

        translation.produce(output);
        Ok(translation)
    }
}
