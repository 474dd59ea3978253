use super::{LintResult, LintSeverity, TagLintRule};
use crate::core::tag_graph::dependencies::DependencyAnalysis;
use crate::core::tag_graph::schema::TagSchema;
use crate::core::tag_graph::variables::extract_variables;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub fn built_in_rules() -> Vec<Box<dyn TagLintRule>> {
    vec![
        Box::new(CircularDependencyRule),
        Box::new(UndeclaredVariableRule),
        Box::new(SelfReferenceRule),
        Box::new(UnreachableDefaultRule),
        Box::new(ConstantConditionRule),
    ]
}

/// Dependency graph over declared tags; edges point from a dependency to its dependent.
fn build_dependency_graph<'a>(
    schema: &'a TagSchema,
    analysis: &DependencyAnalysis,
) -> (DiGraph<&'a str, ()>, HashMap<&'a str, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();
    for name in schema.tags.keys() {
        nodes.insert(name.as_str(), graph.add_node(name.as_str()));
    }
    for name in schema.tags.keys() {
        let to = nodes[name.as_str()];
        for dep in analysis.dependencies_of(name).into_iter().flatten() {
            if let Some(&from) = nodes.get(dep.as_str()) {
                graph.add_edge(from, to, ());
            }
        }
    }
    (graph, nodes)
}

struct CircularDependencyRule;

impl TagLintRule for CircularDependencyRule {
    fn validate(&self, schema: &TagSchema, analysis: &DependencyAnalysis) -> Vec<LintResult> {
        let (graph, _) = build_dependency_graph(schema, analysis);
        let cycles = analysis.detect_circular_dependencies();
        let mut out = Vec::new();

        for component in tarjan_scc(&graph) {
            // Single-tag loops are reported by SelfReferenceRule.
            if component.len() < 2 {
                continue;
            }
            let mut members: Vec<&str> = component.iter().map(|&idx| graph[idx]).collect();
            members.sort_by_key(|name| schema.tags.get_index_of(*name));

            let path = cycles
                .iter()
                .find(|cycle| cycle.len() > 2 && members.contains(&cycle[0].as_str()))
                .map(|cycle| cycle.join(" -> "))
                .unwrap_or_else(|| members.join(", "));

            out.push(LintResult::new(
                "TAG-LINT-001",
                LintSeverity::Error,
                format!("circular dependency: {}", path),
                Some(members[0].to_string()),
                Some("remove one of the references so the tags can be ordered".to_string()),
            ));
        }
        out
    }
}

struct UndeclaredVariableRule;

impl TagLintRule for UndeclaredVariableRule {
    fn validate(&self, schema: &TagSchema, analysis: &DependencyAnalysis) -> Vec<LintResult> {
        let mut out = Vec::new();
        for name in schema.tags.keys() {
            for dep in analysis.dependencies_of(name).into_iter().flatten() {
                if schema.contains(dep) {
                    continue;
                }
                out.push(LintResult::new(
                    "TAG-LINT-002",
                    LintSeverity::Warning,
                    format!(
                        "condition of '{}' references undeclared tag '{}'",
                        name, dep
                    ),
                    Some(name.clone()),
                    Some("declare the tag or fix the name used in the condition".to_string()),
                ));
            }
        }
        out
    }
}

struct SelfReferenceRule;

impl TagLintRule for SelfReferenceRule {
    fn validate(&self, schema: &TagSchema, analysis: &DependencyAnalysis) -> Vec<LintResult> {
        schema
            .tags
            .keys()
            .filter(|name| analysis.depends_on(name, name))
            .map(|name| {
                LintResult::new(
                    "TAG-LINT-003",
                    LintSeverity::Warning,
                    format!("condition of '{}' references the tag itself", name),
                    Some(name.clone()),
                    Some("a tag cannot be answered before it is asked; drop the reference".to_string()),
                )
            })
            .collect()
    }
}

struct UnreachableDefaultRule;

impl TagLintRule for UnreachableDefaultRule {
    fn validate(&self, schema: &TagSchema, _analysis: &DependencyAnalysis) -> Vec<LintResult> {
        schema
            .tags
            .iter()
            .filter(|(_, definition)| definition.default.is_some() && definition.condition.is_none())
            .map(|(name, _)| {
                LintResult::new(
                    "TAG-LINT-004",
                    LintSeverity::Info,
                    format!(
                        "tag '{}' declares a default but has no condition, so the default is never applied",
                        name
                    ),
                    Some(name.clone()),
                    Some("add a `req` condition or remove `default`".to_string()),
                )
            })
            .collect()
    }
}

struct ConstantConditionRule;

impl TagLintRule for ConstantConditionRule {
    fn validate(&self, schema: &TagSchema, _analysis: &DependencyAnalysis) -> Vec<LintResult> {
        let mut out = Vec::new();
        for (name, definition) in &schema.tags {
            if let Some(condition) = definition.condition.as_deref() {
                if reads_no_tags(condition) {
                    out.push(LintResult::new(
                        "TAG-LINT-005",
                        LintSeverity::Info,
                        format!("condition '{}' of '{}' reads no tags", condition, name),
                        Some(name.clone()),
                        Some("remove the condition or reference the tag it depends on".to_string()),
                    ));
                }
            }
            for entry in definition.conditioned_values() {
                let condition = entry.condition().unwrap_or_default();
                if reads_no_tags(condition) {
                    out.push(LintResult::new(
                        "TAG-LINT-005",
                        LintSeverity::Info,
                        format!(
                            "condition '{}' on value '{}' of '{}' reads no tags",
                            condition,
                            entry.display_value(),
                            name
                        ),
                        Some(name.clone()),
                        Some("remove the condition or reference the tag it depends on".to_string()),
                    ));
                }
            }
        }
        out
    }
}

fn reads_no_tags(condition: &str) -> bool {
    !condition.trim().is_empty() && extract_variables(Some(condition)).is_empty()
}
