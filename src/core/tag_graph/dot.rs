use crate::core::tag_graph::schema::TagSchema;
use crate::core::tag_graph::variables::extract_variables;
use indexmap::IndexMap;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use std::fmt;

/// Node weight carrying tag display information.
struct TagNode {
    name: String,
    declared: bool,
}

impl fmt::Display for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.declared {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (undeclared)", self.name)
        }
    }
}

/// Edge weight listing which conditions created the dependency.
struct EdgeData {
    label: String,
}

impl fmt::Display for EdgeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

fn build_graph(schema: &TagSchema) -> DiGraph<TagNode, EdgeData> {
    let mut graph = DiGraph::new();
    let mut node_map: IndexMap<String, NodeIndex> = IndexMap::new();

    for name in schema.tags.keys() {
        let idx = graph.add_node(TagNode {
            name: name.clone(),
            declared: true,
        });
        node_map.insert(name.clone(), idx);
    }

    // (dependency, dependent) -> sources, kept in discovery order.
    let mut edges: IndexMap<(String, String), Vec<String>> = IndexMap::new();
    for (name, definition) in &schema.tags {
        for dep in extract_variables(definition.condition.as_deref()) {
            edges
                .entry((dep, name.clone()))
                .or_default()
                .push("tag".to_string());
        }
        for entry in definition.conditioned_values() {
            for dep in extract_variables(entry.condition()) {
                edges
                    .entry((dep, name.clone()))
                    .or_default()
                    .push(format!("value:{}", entry.display_value()));
            }
        }
    }

    for ((dep, dependent), sources) in edges {
        let from = *node_map.entry(dep.clone()).or_insert_with(|| {
            graph.add_node(TagNode {
                name: dep,
                declared: false,
            })
        });
        let to = node_map[&dependent];
        graph.add_edge(
            from,
            to,
            EdgeData {
                label: truncate(&sources.join(", "), 80),
            },
        );
    }

    graph
}

/// Render the tag dependency graph as a Graphviz DOT string using petgraph.
///
/// Edges point from a dependency to the tag whose condition reads it.
pub fn schema_to_dot(schema: &TagSchema) -> String {
    let graph = build_graph(schema);
    format!("{}", Dot::new(&graph))
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        value.to_string()
    } else {
        let head: String = value.chars().take(limit).collect();
        format!("{}...", head)
    }
}
