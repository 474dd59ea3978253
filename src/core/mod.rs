pub mod config;
pub mod error;
pub mod tag_graph;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, MediatagConfig};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use tag_graph::{
    extract_variables, DependencyAnalysis, DependencyMap, OrderingOptions, TagDefinition,
    TagDependencyEngine, TagSchema, ValueEntry,
};
pub use types::*;
