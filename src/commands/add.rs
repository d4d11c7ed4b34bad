//! Add command implementation
//!
//! This module fetches a new reference from `<url>/types/<lang>` and saves it,
//! picking a host-derived file name when the default one is already taken.

use log::debug;

use super::{Context, reference::save_reference};
use crate::{
    args::Command,
    errors::AppError,
    fetch::Fetch,
    languages::LanguageProfile,
    utils::{append_query_string, combine_paths, host_file_name},
};

/// URL a new reference for `lang` is fetched from
///
/// `source_url` is used as is when it already points at `/types/<lang>`.
pub fn types_url(source_url: &str, lang: &LanguageProfile, command: &Command) -> String {
    let types_path = format!("/types/{}", lang.id);
    let url = if source_url.contains(&types_path) {
        source_url.to_string()
    } else {
        combine_paths(&[source_url, &types_path])
    };

    append_query_string(&url, &command.query_params)
}

/// Add a new reference
///
/// # Errors
///
/// Returns an error if the command has no URL, or fetching or writing the
/// reference fails.
pub async fn add_reference<F: Fetch>(
    ctx: &Context<F>,
    lang: &LanguageProfile,
    command: &Command,
) -> Result<(), AppError> {
    let Some(source_url) = command.source_url.as_deref() else {
        return Err(AppError::InvalidUrl {
            url: String::new(),
            reason: "no server URL given".to_string(),
        });
    };

    let types_url = types_url(source_url, lang, command);

    let mut file_name = command
        .output_path
        .clone()
        .unwrap_or_else(|| lang.default_file.to_string());

    if ctx.settings.resolve(&file_name).exists() {
        let renamed = host_file_name(&types_url, lang.default_file)?;
        debug!("{} already exists, saving to {}", file_name, renamed);
        file_name = renamed;
    }

    save_reference(ctx, lang, &types_url, &file_name).await
}
