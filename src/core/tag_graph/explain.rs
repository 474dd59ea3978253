#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::tag_graph::dependencies::DependencyAnalysis;
use crate::core::tag_graph::ordering::OrderingOptions;
use crate::core::tag_graph::schema::TagSchema;
use serde::Serialize;
use serde_json::Value;

/// Output produced by `mediatag explain`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainOutput {
    pub input_order: Vec<String>,
    pub tags: Vec<TagExplain>,
}

/// One tag of the presentation order and the reasons for its position.
#[derive(Debug, Clone, Serialize)]
pub struct TagExplain {
    pub name: String,
    pub position: usize,
    pub original_position: usize,
    /// `true` when the tag's index differs from its index in the input order.
    pub moved: bool,
    pub dependencies: Vec<String>,
    /// Dependencies that are not part of the ordered list and so never constrain it.
    pub unresolved: Vec<String>,
    pub condition: Option<String>,
    pub value_conditions: Vec<ValueConditionExplain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueConditionExplain {
    pub value: String,
    pub condition: String,
}

/// Order `tag_order` and describe where every tag ended up.
pub fn build_explain_output<S: AsRef<str>>(
    schema: &TagSchema,
    analysis: &DependencyAnalysis,
    tag_order: &[S],
    options: &OrderingOptions,
) -> Result<ExplainOutput, AppError> {
    let input_order: Vec<String> = tag_order
        .iter()
        .map(|tag| tag.as_ref().to_string())
        .collect();
    let ordered = analysis.ordered_tags(input_order.as_slice(), options)?;

    let tags = ordered
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let original_position = input_order
                .iter()
                .position(|candidate| candidate == name)
                .unwrap_or(position);
            let dependencies: Vec<String> = analysis
                .dependencies_of(name)
                .map(|deps| deps.iter().cloned().collect())
                .unwrap_or_default();
            let unresolved = dependencies
                .iter()
                .filter(|dep| !input_order.contains(dep))
                .cloned()
                .collect();
            let definition = schema.get(name);
            let value_conditions = definition
                .map(|definition| {
                    definition
                        .conditioned_values()
                        .map(|entry| ValueConditionExplain {
                            value: entry.display_value(),
                            condition: entry.condition().unwrap_or_default().to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();

            TagExplain {
                name: name.clone(),
                position,
                original_position,
                moved: position != original_position,
                dependencies,
                unresolved,
                condition: definition.and_then(|definition| definition.condition.clone()),
                value_conditions,
                default: definition.and_then(|definition| definition.default.clone()),
            }
        })
        .collect();

    Ok(ExplainOutput { input_order, tags })
}
