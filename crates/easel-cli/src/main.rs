//! Easel CLI entry point.

use std::{env, process, str::FromStr};

use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug, error, info};

use easel::EaselError;
use easel_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // A bare invocation is a help request, not an error
    if env::args().len() <= 1 {
        let _ = Args::command().print_help();
        process::exit(0);
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // clap prints help/version on stdout with success semantics;
            // genuine argument errors go to stderr
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Easel");
    debug!(args:?; "Parsed arguments");

    // Run the application
    if let Err(err) = easel_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // Render each diagnostic independently
        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");

            error!("{writer}");
        }

        process::exit(exit_code(&err));
    }

    info!("Completed successfully");
}

/// Map failures to the exit codes build tooling distinguishes: bad
/// layout versus unwritable output.
fn exit_code(err: &EaselError) -> i32 {
    match err {
        EaselError::Syntax { .. } | EaselError::Validation { .. } => 2,
        EaselError::Io(_) => 3,
    }
}
