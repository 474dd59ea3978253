use clap::Parser;
use mediatag::cli::{self, Args};
use mediatag::core::{AppError, DefaultErrorReporter, ErrorReporter};
use mediatag::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let workspace = args
        .global
        .workspace
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let _guard = match logging::init(workspace.as_deref(), args.global.verbose) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("failed to initialize logging: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => DefaultErrorReporter::new().report_error(app_error),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
