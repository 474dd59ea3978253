#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::tag_graph::cycles;
use crate::core::tag_graph::ordering::{self, OrderingOptions};
use crate::core::tag_graph::schema::{TagDefinition, TagSchema};
use crate::core::tag_graph::variables::extract_variables;
use indexmap::{IndexMap, IndexSet};

/// Tag name mapped to the variables its conditions read, in first-appearance order.
pub type DependencyMap = IndexMap<String, Vec<String>>;

/// Immutable result of analyzing a schema's conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyAnalysis {
    dependencies: IndexMap<String, IndexSet<String>>,
}

impl DependencyAnalysis {
    /// Collect the variables of every tag-level and value-level condition in the schema.
    pub fn from_schema(schema: &TagSchema) -> Self {
        let dependencies = schema
            .tags
            .iter()
            .map(|(name, definition)| {
                let deps = collect_dependencies(definition);
                tracing::debug!(tag = %name, dependencies = ?deps, "analyzed tag conditions");
                (name.clone(), deps)
            })
            .collect();
        Self { dependencies }
    }

    /// Build an analysis directly from a dependency map. Duplicate names collapse.
    pub fn from_dependency_map(map: DependencyMap) -> Self {
        let dependencies = map
            .into_iter()
            .map(|(tag, deps)| (tag, deps.into_iter().collect()))
            .collect();
        Self { dependencies }
    }

    /// Dependencies of `tag`, or `None` when the tag was not part of the analyzed schema.
    pub fn dependencies_of(&self, tag: &str) -> Option<&IndexSet<String>> {
        self.dependencies.get(tag)
    }

    pub fn depends_on(&self, tag: &str, dependency: &str) -> bool {
        self.dependencies
            .get(tag)
            .is_some_and(|deps| deps.contains(dependency))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Materialize the analysis as a tag-to-list mapping.
    pub fn to_map(&self) -> DependencyMap {
        self.dependencies
            .iter()
            .map(|(tag, deps)| (tag.clone(), deps.iter().cloned().collect()))
            .collect()
    }

    /// Reorder `tag_order` so every tag follows the tags it depends on.
    pub fn ordered_tags<S: AsRef<str>>(
        &self,
        tag_order: &[S],
        options: &OrderingOptions,
    ) -> Result<Vec<String>, AppError> {
        ordering::order_tags(self, tag_order, options)
    }

    pub fn detect_circular_dependencies(&self) -> Vec<Vec<String>> {
        cycles::detect_cycles(&self.dependencies)
    }
}

fn collect_dependencies(definition: &TagDefinition) -> IndexSet<String> {
    let mut deps: IndexSet<String> = extract_variables(definition.condition.as_deref())
        .into_iter()
        .collect();
    for entry in definition.conditioned_values() {
        deps.extend(extract_variables(entry.condition()));
    }
    deps
}

/// Stateful facade keeping the most recently analyzed schema and its dependencies.
#[derive(Debug, Clone, Default)]
pub struct TagDependencyEngine {
    schema: TagSchema,
    analysis: DependencyAnalysis,
    options: OrderingOptions,
}

impl TagDependencyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: OrderingOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Analyze `schema`, replacing any previous analysis, and return the dependency map.
    pub fn analyze_dependencies(&mut self, schema: &TagSchema) -> DependencyMap {
        self.schema = schema.clone();
        self.analysis = DependencyAnalysis::from_schema(schema);
        self.analysis.to_map()
    }

    /// Order `tag_order` using the last analysis.
    pub fn get_ordered_tags<S: AsRef<str>>(
        &self,
        tag_order: &[S],
    ) -> Result<Vec<String>, AppError> {
        self.analysis.ordered_tags(tag_order, &self.options)
    }

    /// Cycles in the last analysis. Empty when the schema is acyclic.
    pub fn detect_circular_dependencies(&self) -> Vec<Vec<String>> {
        self.analysis.detect_circular_dependencies()
    }

    pub fn analysis(&self) -> &DependencyAnalysis {
        &self.analysis
    }

    pub fn schema(&self) -> &TagSchema {
        &self.schema
    }

    pub fn options(&self) -> &OrderingOptions {
        &self.options
    }
}
