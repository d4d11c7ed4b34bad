//! Reference header parsing
//!
//! Every generated reference starts with a comment block describing how it was
//! generated:
//!
//! ```text
//! /* Options:
//! Version: 8.91
//! BaseUrl: https://localhost:5001
//!
//! GlobalNamespace: MyApp
//! //MakePartial: True
//! */
//! ```
//!
//! Uncommented `Key: Value` lines after `BaseUrl:` are options the user has
//! overridden; commented ones are generator defaults. Re-sending the overridden
//! options to `<BaseUrl>/types/<lang>` regenerates the same reference.

use indexmap::IndexMap;

use crate::{
    errors::AppError,
    languages::{CommentDialect, LanguageProfile},
    utils::{append_query_string, combine_paths},
};

/// Marker present in every reference header and every valid server response
pub const OPTIONS_MARKER: &str = "Options:";

const BASE_URL_PREFIX: &str = "BaseUrl: ";

/// Metadata recovered from an existing reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMetadata {
    pub base_url: String,
    /// Active options in the order they appear in the header
    pub options: IndexMap<String, String>,
}

impl HeaderMetadata {
    /// URL that regenerates this reference for `lang`
    pub fn types_url(&self, lang: &LanguageProfile) -> String {
        let url = combine_paths(&[&self.base_url, &format!("/types/{}", lang.id)]);
        append_query_string(&url, &self.options)
    }
}

/// Parse the `Options:` header of an existing reference
///
/// The header is scanned with the comment dialect of `lang`, the language the
/// file was saved for. `file` is only used in error messages.
///
/// # Errors
///
/// Returns [`AppError::HeaderNotFound`] if `src` has no `Options:` marker and
/// [`AppError::MissingBaseUrl`] if the header has no `BaseUrl:` line.
pub fn parse_options(
    src: &str,
    lang: &LanguageProfile,
    file: &str,
) -> Result<HeaderMetadata, AppError> {
    let start = src
        .find(OPTIONS_MARKER)
        .ok_or_else(|| AppError::HeaderNotFound {
            file: file.to_string(),
        })?;

    let disabled = lang.dialect.disabled_marker();
    let mut base_url: Option<String> = None;
    let mut options = IndexMap::new();

    for raw in src[start..].lines() {
        let Some(line) = header_line(raw, &lang.dialect) else {
            break;
        };

        if let Some(url) = line.strip_prefix(BASE_URL_PREFIX) {
            base_url = Some(url.trim().to_string());
            continue;
        }

        if base_url.is_none() || line.starts_with(disabled) {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                options
                    .entry(key.to_string())
                    .or_insert_with(|| value.trim().to_string());
            }
        }
    }

    match base_url {
        Some(base_url) if !base_url.is_empty() => Ok(HeaderMetadata { base_url, options }),
        _ => Err(AppError::MissingBaseUrl {
            file: file.to_string(),
        }),
    }
}

/// Text of a header line with any dialect prefix removed, or `None` once the
/// header has ended
fn header_line<'a>(line: &'a str, dialect: &CommentDialect) -> Option<&'a str> {
    let trimmed = line.trim();
    match *dialect {
        CommentDialect::Block { close, .. } => (trimmed != close).then(|| line.trim_start()),
        CommentDialect::QuotedBlock { quote, .. } => (trimmed != quote).then(|| line.trim_start()),
        CommentDialect::LinePrefix { prefix, close, .. } => {
            let ended = match close {
                Some(close) => trimmed == close,
                None => trimmed.is_empty(),
            };
            if ended {
                return None;
            }
            let line = line.trim_start();
            Some(line.strip_prefix(prefix).map_or(line, str::trim_start))
        }
    }
}
