//! Tag schema dependency analysis and presentation ordering.

pub mod cycles;
pub mod dependencies;
pub mod dot;
pub mod explain;
pub mod lint;
pub mod ordering;
pub mod schema;
pub mod variables;

pub use dependencies::{DependencyAnalysis, DependencyMap, TagDependencyEngine};
pub use ordering::OrderingOptions;
pub use schema::{TagDefinition, TagKind, TagSchema, ValueEntry};
pub use variables::extract_variables;
