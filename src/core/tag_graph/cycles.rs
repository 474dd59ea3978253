use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Depth-first search for dependency cycles.
///
/// Every reported cycle starts and ends with the same tag. Cycles reachable from several
/// entry points may be reported more than once.
pub fn detect_cycles(dependencies: &IndexMap<String, IndexSet<String>>) -> Vec<Vec<String>> {
    let mut search = CycleSearch {
        dependencies,
        visited: HashSet::new(),
        on_stack: HashSet::new(),
        cycles: Vec::new(),
    };
    for tag in dependencies.keys() {
        if !search.visited.contains(tag) {
            search.visit(tag, Vec::new());
        }
    }
    if !search.cycles.is_empty() {
        tracing::warn!(count = search.cycles.len(), "circular tag dependencies detected");
    }
    search.cycles
}

struct CycleSearch<'a> {
    dependencies: &'a IndexMap<String, IndexSet<String>>,
    visited: HashSet<String>,
    on_stack: HashSet<String>,
    cycles: Vec<Vec<String>>,
}

impl<'a> CycleSearch<'a> {
    fn visit(&mut self, tag: &str, mut path: Vec<String>) {
        if self.on_stack.contains(tag) {
            if let Some(start) = path.iter().position(|step| step == tag) {
                let mut cycle = path[start..].to_vec();
                cycle.push(tag.to_string());
                self.cycles.push(cycle);
            }
            return;
        }
        if !self.visited.insert(tag.to_string()) {
            return;
        }

        self.on_stack.insert(tag.to_string());
        path.push(tag.to_string());
        let dependencies: &'a IndexMap<String, IndexSet<String>> = self.dependencies;
        if let Some(deps) = dependencies.get(tag) {
            for dep in deps {
                // Siblings each get their own copy of the path.
                self.visit(dep, path.clone());
            }
        }
        self.on_stack.remove(tag);
    }
}
