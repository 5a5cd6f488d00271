// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::TranslationContext;
use crate::errors::{TranslationError, TranslationResult};
use crate::graph::{DatasetKind, DatasetReference, Node};
use crate::traits::{Translation, Translator};
use crate::translators::derived_name;
use serde_json::Value;

const PROCESS_ID: &str = "filter_temporal";

/// Filter temporal translator - extracts the maps of a space-time raster series
/// that fall into a time interval.
///
/// `extent` is `[start, end]`, start inclusive and end exclusive; either side may
/// be `null` for an open interval. One `t.rast.extract` is emitted per input series.
pub struct FilterTemporalTranslator;

/// The `WHERE` clause selecting maps inside `extent`.
fn temporal_condition(extent: &Value) -> TranslationResult<String> {
    let invalid = |reason: &str| TranslationError::InvalidArgument {
        argument: "extent".to_string(),
        reason: reason.to_string(),
    };

    let bounds = match extent.as_array() {
        Some(bounds) if bounds.len() == 2 => bounds,
        _ => return Err(invalid("expected [start, end]")),
    };

    let bound = |value: &Value| match value {
        Value::Null => Ok(None),
        Value::String(instant) if !instant.is_empty() && !instant.contains('\'') => Ok(Some(instant.clone())),
        _ => Err(invalid("bounds must be date strings or null")),
    };

    let conditions: Vec<String> = [
        bound(&bounds[0])?.map(|start| format!("start_time >= '{}'", start)),
        bound(&bounds[1])?.map(|end| format!("start_time < '{}'", end)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if conditions.is_empty() {
        return Err(invalid("at least one of start and end must be set"));
    }

    Ok(conditions.join(" AND "))
}

impl Translator for FilterTemporalTranslator {
    fn process_id(&self) -> &'static str {
        PROCESS_ID
    }

    fn description(&self) -> &'static str {
        "Selects the maps of a space-time raster series whose start time lies in a [start, end) interval."
    }

    fn translate(&self, node: &Node, ctx: &mut TranslationContext<'_>) -> TranslationResult<Translation> {
        let inputs = ctx.evaluate_dependencies(node)?;

        let condition = temporal_condition(ctx.required_argument(node, "extent")?)?;
        let references = inputs.references("data")?.to_vec();
        if references.is_empty() {
            return Err(TranslationError::ArityMismatch {
                argument: "data".to_string(),
                expected: 1,
                found: 0,
            });
        }

        let mut translation = Translation::after(inputs);
        for reference in &references {
            if reference.require_kind()? != DatasetKind::Strds {
                return Err(TranslationError::IncompatibleDataset {
                    reference: reference.encode(),
                    expected: DatasetKind::Strds.to_string(),
                });
            }
            ctx.record_location(reference);

            let output =
                DatasetReference::derived_from(reference, DatasetKind::Strds, derived_name(reference, PROCESS_ID));
            let extract = ctx
                .command("t.rast.extract")
                .input("input", reference.qualified_name())
                .input("where", condition.as_str())
                .output("output", output.qualified_name());

            translation.push(extract);
            translation.produce(output);
        }

        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::StaticCatalog;
    use crate::translators::test_support::translate;
    use serde_json::json;

    #[test]
    fn test_temporal_condition() {
        let cases = vec![
            (json!(["2001-01-01", "2002-01-01"]), "start_time >= '2001-01-01' AND start_time < '2002-01-01'"),
            (json!(["2001-01-01", null]), "start_time >= '2001-01-01'"),
            (json!([null, "2002-01-01"]), "start_time < '2002-01-01'"),
        ];
        for (extent, expected) in cases {
            assert_eq!(temporal_condition(&extent).unwrap(), expected);
        }
    }

    #[test]
    fn test_invalid_extents() {
        let cases = vec![
            json!([null, null]),
            json!(["2001-01-01"]),
            json!("2001-01-01"),
            json!([2001, 2002]),
            json!(["2001' OR '1'='1", null]),
        ];
        for extent in cases {
            assert!(
                matches!(temporal_condition(&extent), Err(TranslationError::InvalidArgument { .. })),
                "extent {} should be rejected",
                extent
            );
        }
    }

    #[test]
    fn test_extract_from_series() {
        let chain = translate(
            json!({
                "load": {"process_id": "load_collection", "arguments": {"id": "nc_spm_08.landsat.strds.lsat5_1987"}},
                "window": {"process_id": "filter_temporal", "arguments": {
                    "data": {"from_node": "load"},
                    "extent": ["1987-01-01", "1988-01-01"]
                }}
            }),
            &StaticCatalog::new(),
        )
        .unwrap();

        assert_eq!(chain.modules(), vec!["t.info", "g.region", "t.rast.extract"]);
        let extract = &chain.commands[2];
        assert_eq!(extract.input_value("input"), Some("lsat5_1987@landsat"));
        assert_eq!(extract.outputs[0].value, "lsat5_1987_filter_temporal");
        assert_eq!(chain.sink_references[0].name(), "lsat5_1987_filter_temporal");
        assert_eq!(chain.sink_references[0].kind(), Some(DatasetKind::Strds));
        assert_eq!(chain.sink_references[0].collection(), Some("nc_spm_08"));
    }

    #[test]
    fn test_raster_input_rejected() {
        let result = translate(
            json!({
                "load": {"process_id": "load_collection", "arguments": {"id": "nc_spm_08.PERMANENT.raster.elevation"}},
                "window": {"process_id": "filter_temporal", "arguments": {
                    "data": {"from_node": "load"},
                    "extent": ["1987-01-01", null]
                }}
            }),
            &StaticCatalog::new(),
        );
        assert!(matches!(
            result.map_err(|e| matches!(e.root_cause(), TranslationError::IncompatibleDataset { .. })),
            Err(true)
        ));
    }

    #[test]
    fn test_extent_from_parameter() {
        let result = translate(
            json!({
                "parameters": [{"name": "window", "default": ["1987-01-01", null]}],
                "process_graph": {
                    "load": {"process_id": "load_collection", "arguments": {"id": "nc_spm_08.landsat.strds.lsat5_1987"}},
                    "window": {"process_id": "filter_temporal", "arguments": {
                        "data": {"from_node": "load"},
                        "extent": {"from_parameter": "window"}
                    }}
                }
            }),
            &StaticCatalog::new(),
        )
        .unwrap();

        assert_eq!(result.commands[2].input_value("where"), Some("start_time >= '1987-01-01'"));
    }
}
