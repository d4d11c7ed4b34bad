//! Fetching and saving a reference
//!
//! Shared by `add` and `update`: a fetched body is only written once it is
//! known to be a reference, so a bad response never clobbers an existing file.

use log::{debug, info};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;

use super::{Context, VERSION};
use crate::{
    errors::AppError, fetch::Fetch, languages::LanguageProfile, options::OPTIONS_MARKER,
};

const STATS_URL: &str = "https://servicestack.net/stats";

/// Fetch `types_url` and write it to `file_name`
///
/// # Errors
///
/// Returns an error if the fetch fails, the response has no `Options:`
/// header, or the file cannot be written.
pub async fn save_reference<F: Fetch>(
    ctx: &Context<F>,
    lang: &LanguageProfile,
    types_url: &str,
    file_name: &str,
) -> Result<(), AppError> {
    debug!("Fetching {} reference from {}", lang.id, types_url);

    let path = ctx.settings.resolve(file_name);
    let dtos = ctx.fetcher.fetch(types_url).await?;

    if !dtos.contains(OPTIONS_MARKER) {
        return Err(AppError::InvalidServerResponse {
            url: types_url.to_string(),
        });
    }

    let existed = path.exists();
    write_atomic(&path, &dtos).map_err(|source| AppError::WriteFailed {
        file: file_name.to_string(),
        source,
    })?;

    if existed {
        info!("Updated: {}", file_name);
    } else {
        info!("Saved to: {}", file_name);
    }

    record_usage(ctx, lang, if existed { "updateref" } else { "addref" }).await;

    Ok(())
}

/// Replace `path` with `contents` via a temporary file in the same directory,
/// so an interrupted write never leaves a truncated reference
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Best-effort anonymous usage ping; failures are ignored
async fn record_usage<F: Fetch>(ctx: &Context<F>, lang: &LanguageProfile, kind: &str) {
    if !ctx.settings.telemetry_enabled() {
        return;
    }

    let url = format!(
        "{STATS_URL}/{kind}/record?name={}&source=cli&version={VERSION}",
        urlencoding::encode(lang.id)
    );
    if let Err(e) = ctx.fetcher.fetch(&url).await {
        debug!("Usage ping failed: {}", e);
    }
}
