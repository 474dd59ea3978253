use crate::core::tag_graph::ordering::OrderingOptions;
use crate::core::types::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from mediatag.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediatagConfig {
    /// Schema location
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Ordering behavior
    #[serde(default)]
    pub ordering: OrderingConfig,

    /// Output rendering
    #[serde(default)]
    pub output: OutputConfig,
}

/// Schema configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Schema file used when a command is given no SCHEMA argument.
    /// Relative paths resolve against the workspace.
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,
}

/// Ordering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Reject cyclic tag lists before reordering
    #[serde(default = "default_check_cycles")]
    pub check_cycles: bool,

    /// Explicit repositioning budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_moves: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("events_tags.yaml")
}

fn default_check_cycles() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            path: default_schema_path(),
        }
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        OrderingConfig {
            check_cycles: default_check_cycles(),
            max_moves: None,
        }
    }
}

impl OrderingConfig {
    pub fn options(&self) -> OrderingOptions {
        OrderingOptions {
            check_cycles: self.check_cycles,
            max_moves: self.max_moves,
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
