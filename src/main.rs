#![forbid(unsafe_code)]

//! DTO Reference Tool
//!
//! This program adds generated DTO reference files from a remote
//! code-generation endpoint and refreshes existing ones in place. An existing
//! reference is updated by reading back the `Options:` header it was generated
//! with and requesting the same types again.

use log::{debug, error};
use std::process::ExitCode;

// Import modules
mod args;
mod commands;
mod config;
mod errors;
mod fetch;
mod languages;
mod options;
mod utils;

use crate::args::{Command, parse_os_args};
use crate::commands::Context;
use crate::config::Settings;
use crate::errors::AppError;
use crate::fetch::HttpFetcher;

/**
 * Main function
 *
 * This function classifies command-line arguments, initializes the logger,
 * and runs the resulting command on a single-threaded runtime.
 *
 * @return Exit code, non-zero on any failure
 */
fn main() -> ExitCode {
    let mut argv = std::env::args_os();
    let program = argv.next().map(|p| p.to_string_lossy().into_owned());
    let command = parse_os_args(argv);

    // Initialize logger
    let default_filter = if command.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    match run(program.as_deref(), &command) {
        Ok(()) => ExitCode::SUCCESS,
        // usage and the notice have already been printed
        Err(AppError::UnrecognizedArgument { .. }) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(program: Option<&str>, command: &Command) -> Result<(), AppError> {
    let settings = Settings::from_env(program)?;
    debug!("Settings: {:?}", settings);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let ctx = Context {
            fetcher: HttpFetcher::new(command.ignore_tls_errors)?,
            settings,
        };
        commands::run(command, &ctx).await
    })
}
