use crate::core::types::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Workspace holding mediatag.toml and relative schema paths (default: current directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Configuration")]
    pub workspace: Option<PathBuf>,

    /// Path to custom config file (default: {workspace}/mediatag.toml)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Output format: text or json (default: config value, then text)
    #[arg(long, global = true, value_name = "FORMAT", help_heading = "Output Options")]
    pub format: Option<OutputFormat>,

    /// Raise the log level to debug
    #[arg(long, global = true, help_heading = "Output Options")]
    pub verbose: bool,
}

/// Arguments for commands that only read a schema.
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Tag schema YAML file (default: [schema].path from the config)
    #[arg(value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,
}

/// Arguments for commands that order a list of tags.
#[derive(Args, Debug, Clone, Default)]
pub struct OrderArgs {
    /// Tag schema YAML file (default: [schema].path from the config)
    #[arg(value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Comma-separated tags to order (default: the schema's declared order)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Override the move budget used while repairing the order
    #[arg(long, value_name = "N", help_heading = "Ordering")]
    pub max_moves: Option<usize>,

    /// Skip the cycle precheck and rely on the move budget alone
    #[arg(long, help_heading = "Ordering")]
    pub no_cycle_check: bool,
}

impl OrderArgs {
    /// Tags named on the command line with surrounding whitespace and empty items removed.
    pub fn requested_tags(&self) -> Option<Vec<String>> {
        self.tags.as_ref().map(|tags| {
            tags.iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}
