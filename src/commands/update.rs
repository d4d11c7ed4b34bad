//! Update command implementation
//!
//! An existing reference carries everything needed to regenerate it: the
//! server it came from and the options the user overrode. This module reads
//! that header back and re-fetches the reference in place.

use log::{error, info};
use std::fs;

use super::{Context, reference::save_reference};
use crate::{
    errors::AppError, fetch::Fetch, languages::LanguageProfile, options::parse_options,
    utils::find_reference_files,
};

/// Update a single reference file
///
/// # Errors
///
/// Returns an error if:
/// - `target` does not have the extension of `lang`
/// - `target` does not exist
/// - `target` has no `Options:` header or no `BaseUrl:`
/// - Fetching or writing the new reference fails
pub async fn update_reference<F: Fetch>(
    ctx: &Context<F>,
    lang: &LanguageProfile,
    target: &str,
) -> Result<(), AppError> {
    if !target.ends_with(lang.extension) {
        return Err(AppError::ExtensionMismatch {
            file: target.to_string(),
            expected: lang.extension.to_string(),
        });
    }

    let path = ctx.settings.resolve(target);
    if !path.exists() {
        return Err(AppError::FileNotFound {
            path: path.display().to_string().replace('\\', "/"),
        });
    }

    let src = fs::read_to_string(&path)?;
    let header = parse_options(&src, lang, target)?;
    let types_url = header.types_url(lang);

    save_reference(ctx, lang, &types_url, target).await
}

/// Update every reference for `lang` under the working directory
///
/// Files are updated one at a time; a failure is logged and the remaining
/// files are still processed.
///
/// # Errors
///
/// Returns [`AppError::NoReferencesFound`] when there is nothing to update and
/// [`AppError::BatchFailed`] when any file failed.
pub async fn update_all<F: Fetch>(
    ctx: &Context<F>,
    lang: &LanguageProfile,
) -> Result<(), AppError> {
    let cwd = &ctx.settings.cwd;
    let files = find_reference_files(cwd, lang.default_file)?;

    if files.is_empty() {
        return Err(AppError::NoReferencesFound {
            file_name: lang.default_file.to_string(),
        });
    }

    info!("Found {} {} reference(s)", files.len(), lang.id);

    let mut failed = 0;
    for file in &files {
        let target = file.strip_prefix(cwd).unwrap_or(file).to_string_lossy();
        if let Err(e) = update_reference(ctx, lang, &target).await {
            error!("{}: {}", target, e);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(AppError::BatchFailed {
            failed,
            total: files.len(),
        });
    }

    Ok(())
}
