pub mod args;
pub mod commands;

pub use args::{GlobalArgs, OrderArgs, SchemaArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
SCHEMA COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "mediatag")]
#[command(version = crate::VERSION)]
#[command(about = "Tag schema dependency analysis and presentation ordering")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: lint a schema, inspect its dependencies, then order the tags for presentation."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Print the dependency map of a schema",
        long_about = "Deps lists, for every declared tag, the tags its tag-level and value-level conditions read.",
        after_help = "Example:\n    mediatag deps events_tags.yaml"
    )]
    Deps(SchemaArgs),
    #[command(
        about = "Order tags so each follows the tags it depends on",
        long_about = "Order repairs the given tag list (or the declared order) until no tag precedes a tag its conditions read.",
        after_help = "Example:\n    mediatag order events_tags.yaml --tags dance_style,action,girls"
    )]
    Order(OrderArgs),
    #[command(
        about = "Report circular dependencies",
        long_about = "Cycles prints every cycle found by a depth-first search of the dependency map and exits non-zero when any exist.",
        after_help = "Example:\n    mediatag cycles events_tags.yaml"
    )]
    Cycles(SchemaArgs),
    #[command(
        about = "Check a schema for dependency problems",
        long_about = "Lint runs the built-in rules (cycles, undeclared tags, self references, unreachable defaults, constant conditions) and exits non-zero on errors.",
        after_help = "Example:\n    mediatag lint events_tags.yaml --format json"
    )]
    Lint(SchemaArgs),
    #[command(
        about = "Explain where each tag lands in the presentation order",
        long_about = "Explain orders the tags and shows each tag's original and final position with the dependencies and conditions behind it.",
        after_help = "Example:\n    mediatag explain events_tags.yaml --tags scene,action"
    )]
    Explain(OrderArgs),
    #[command(
        about = "Render the dependency graph as Graphviz DOT",
        long_about = "Dot writes the dependency graph to stdout; edges point from a dependency to the tag that reads it.",
        after_help = "Example:\n    mediatag dot events_tags.yaml | dot -Tsvg > tags.svg"
    )]
    Dot(SchemaArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    let context = commands::CommandContext::resolve(&args.global)?;
    match args.command {
        Command::Deps(schema_args) => commands::deps(&context, schema_args),
        Command::Order(order_args) => commands::order(&context, order_args),
        Command::Cycles(schema_args) => commands::cycles(&context, schema_args),
        Command::Lint(schema_args) => commands::lint(&context, schema_args),
        Command::Explain(order_args) => commands::explain(&context, order_args),
        Command::Dot(schema_args) => commands::dot(&context, schema_args),
    }
}
