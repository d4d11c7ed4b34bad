//! Command implementations
//!
//! This module dispatches a classified [`Command`] to its implementation.
//!
//! # Available Commands
//!
//! - [`add`] - Fetch a new reference from a server
//! - [`update`] - Refresh existing references from their own headers
//! - [`help`] - Print usage

pub mod add;
pub mod help;
pub mod reference;
pub mod update;

use log::debug;

use crate::{
    args::{Command, CommandKind},
    config::Settings,
    errors::AppError,
    fetch::Fetch,
    languages::{self, LanguageProfile},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What every command needs to touch the outside world
pub struct Context<F> {
    pub fetcher: F,
    pub settings: Settings,
}

/// Run a classified command
///
/// `--json` wins over everything and only prints the command. Unrecognized
/// arguments print usage and fail regardless of the command kind.
pub async fn run<F: Fetch>(command: &Command, ctx: &Context<F>) -> Result<(), AppError> {
    if command.json_output {
        println!("{}", serde_json::to_string_pretty(command)?);
        return Ok(());
    }

    if !command.unrecognized.is_empty() {
        return help::print_help(command, &ctx.settings);
    }

    debug!("Running {:?}", command);

    match command.kind {
        CommandKind::Help => help::print_help(command, &ctx.settings),
        CommandKind::Version => {
            println!("Version: {}", VERSION);
            Ok(())
        }
        CommandKind::Update => {
            let lang = require_language(command, &ctx.settings)?;
            match &command.output_path {
                Some(target) => update::update_reference(ctx, lang, target).await,
                None => update::update_all(ctx, lang).await,
            }
        }
        CommandKind::Add => {
            let lang = require_language(command, &ctx.settings)?;
            add::add_reference(ctx, lang, command).await
        }
    }
}

fn require_language(
    command: &Command,
    settings: &Settings,
) -> Result<&'static LanguageProfile, AppError> {
    command
        .language
        .and_then(languages::find)
        .ok_or_else(|| AppError::LanguageRequired {
            tool: settings.tool_name.clone(),
        })
}
