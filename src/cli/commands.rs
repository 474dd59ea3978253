use crate::{
    cli::args::{GlobalArgs, OrderArgs, SchemaArgs},
    core::{
        tag_graph::{
            dot::schema_to_dot,
            explain::{build_explain_output, ExplainOutput},
            lint::{has_errors, LintRegistry, LintResult},
        },
        AppError, ConfigLoader, ConfigValidator, ErrorCategory, MediatagConfig, OrderingOptions,
        OutputFormat, TagDependencyEngine, TagSchema,
    },
    Result,
};
use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

/// Workspace, configuration and output settings resolved once per invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub workspace: PathBuf,
    pub config: MediatagConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let workspace = match &global.workspace {
            Some(workspace) => workspace.clone(),
            None => env::current_dir().context("failed to read current directory")?,
        };

        let config = match &global.config {
            Some(path) => ConfigLoader::load_explicit(path)?,
            None => ConfigLoader::load_from_workspace(&workspace)?,
        };
        ConfigValidator::validate(&config)?;

        let format = global.format.unwrap_or(config.output.format);
        Ok(Self {
            workspace,
            config,
            format,
        })
    }

    /// Schema path from the command line, falling back to the configured one.
    /// Relative paths resolve against the workspace.
    pub fn schema_path(&self, requested: Option<&Path>) -> PathBuf {
        let path = requested.unwrap_or(&self.config.schema.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    fn load_schema(&self, requested: Option<&Path>) -> Result<TagSchema> {
        let path = self.schema_path(requested);
        let schema = TagSchema::load_from_file(&path)?;
        tracing::info!(path = %path.display(), tags = schema.len(), "loaded tag schema");
        Ok(schema)
    }

    fn ordering_options(&self, args: &OrderArgs) -> OrderingOptions {
        let mut options = self.config.ordering.options();
        if args.max_moves.is_some() {
            options.max_moves = args.max_moves;
        }
        if args.no_cycle_check {
            options.check_cycles = false;
        }
        options
    }
}

pub fn deps(context: &CommandContext, args: SchemaArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    let mut engine = TagDependencyEngine::new();
    let dependencies = engine.analyze_dependencies(&schema);

    match context.format {
        OutputFormat::Text => {
            for (tag, deps) in &dependencies {
                if deps.is_empty() {
                    println!("{}: (none)", tag);
                } else {
                    println!("{}: {}", tag, deps.join(", "));
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dependencies)?),
    }
    Ok(())
}

pub fn order(context: &CommandContext, args: OrderArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    let tag_order = args
        .requested_tags()
        .unwrap_or_else(|| schema.declared_order());

    let mut engine = TagDependencyEngine::with_options(context.ordering_options(&args));
    engine.analyze_dependencies(&schema);
    let ordered = engine.get_ordered_tags(tag_order.as_slice())?;
    tracing::info!(tags = ordered.len(), "ordered tags");

    match context.format {
        OutputFormat::Text => {
            for tag in &ordered {
                println!("{}", tag);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ordered)?),
    }
    Ok(())
}

pub fn cycles(context: &CommandContext, args: SchemaArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    let mut engine = TagDependencyEngine::new();
    engine.analyze_dependencies(&schema);
    let cycles = engine.detect_circular_dependencies();

    match context.format {
        OutputFormat::Text => {
            if cycles.is_empty() {
                println!("no circular dependencies found");
            }
            for cycle in &cycles {
                println!("{}", cycle.join(" -> "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cycles)?),
    }

    if cycles.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorCategory::ValidationError,
            format!("schema contains {} circular dependencies", cycles.len()),
        )
        .with_code("TAG-CHECK-001")
        .into())
    }
}

pub fn lint(context: &CommandContext, args: SchemaArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    let results = LintRegistry::new().run(&schema);

    match context.format {
        OutputFormat::Text => print_lint_results(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    if has_errors(&results) {
        tracing::warn!(results = results.len(), "lint reported errors");
        Err(AppError::new(
            ErrorCategory::ValidationError,
            "schema lint reported errors",
        )
        .with_code("TAG-CHECK-002")
        .into())
    } else {
        Ok(())
    }
}

fn print_lint_results(results: &[LintResult]) {
    if results.is_empty() {
        println!("no issues found");
        return;
    }
    for result in results {
        match &result.location {
            Some(location) => println!(
                "[{}] {} {}: {}",
                result.severity, result.code, location, result.message
            ),
            None => println!("[{}] {}: {}", result.severity, result.code, result.message),
        }
        if let Some(suggestion) = &result.suggestion {
            println!("    hint: {}", suggestion);
        }
    }
}

pub fn explain(context: &CommandContext, args: OrderArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    let tag_order = args
        .requested_tags()
        .unwrap_or_else(|| schema.declared_order());

    let mut engine = TagDependencyEngine::with_options(context.ordering_options(&args));
    engine.analyze_dependencies(&schema);
    let output = build_explain_output(
        &schema,
        engine.analysis(),
        tag_order.as_slice(),
        engine.options(),
    )?;

    match context.format {
        OutputFormat::Text => print_explain(&output),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}

fn print_explain(output: &ExplainOutput) {
    for tag in &output.tags {
        if tag.moved {
            println!(
                "{}. {} (moved from {})",
                tag.position + 1,
                tag.name,
                tag.original_position + 1
            );
        } else {
            println!("{}. {}", tag.position + 1, tag.name);
        }
        if !tag.dependencies.is_empty() {
            println!("   depends on: {}", tag.dependencies.join(", "));
        }
        if !tag.unresolved.is_empty() {
            println!("   not in list: {}", tag.unresolved.join(", "));
        }
        if let Some(condition) = &tag.condition {
            println!("   req: {}", condition);
        }
        for value in &tag.value_conditions {
            println!("   value {} req: {}", value.value, value.condition);
        }
    }
}

/// DOT output ignores `--format`.
pub fn dot(context: &CommandContext, args: SchemaArgs) -> Result<()> {
    let schema = context.load_schema(args.schema.as_deref())?;
    print!("{}", schema_to_dot(&schema));
    Ok(())
}
