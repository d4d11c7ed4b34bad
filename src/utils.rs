//! Utility functions for file system and URL handling
//!
//! This module provides helper functions for finding reference files in a
//! directory tree and for building the URLs references are fetched from.

use indexmap::IndexMap;
use reqwest::Url;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::AppError;

/// Directory names never searched for references
pub const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".vscode",
    ".idea",
    "node_modules",
    "bin",
    "obj",
    "dist",
    "build",
    ".venv",
    "packages",
    "gradle",
    ".gradle",
    "dart_tool",
    ".dart_tool",
    "vendor",
    "target",
];

/// Hosts whose TLS certificates are assumed to be self-signed
const LOCAL_HOSTS: &[&str] = &[
    "localhost",
    "0.0.0.0",
    "127.0.0.1",
    "10.0.2.2",
    "192.168.0.2",
];

/// Recursively find all files whose name ends with `suffix`
///
/// Directories named in [`IGNORE_DIRS`] are skipped. The result is sorted so
/// files are always processed in the same order.
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn find_reference_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    collect_reference_files(dir, suffix, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_reference_files(
    dir: &Path,
    suffix: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), std::io::Error> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        // symlinks are not followed
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if !IGNORE_DIRS.iter().any(|ignored| *ignored == name) {
                collect_reference_files(&path, suffix, files)?;
            }
        } else if file_type.is_file() && name.ends_with(suffix) {
            files.push(path);
        }
    }

    Ok(())
}

/// Join URL and path segments with single `/` separators
///
/// Segments containing `://` are kept whole (minus a trailing `/`); the rest
/// are split on `/`, with empty and `.` segments dropped and `..` popping the
/// previous segment.
pub fn combine_paths(paths: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for &path in paths {
        if path.contains("://") {
            parts.push(path.strip_suffix('/').unwrap_or(path));
        } else {
            parts.extend(path.split('/'));
        }
    }

    let mut combined: Vec<&str> = Vec::new();
    for part in &parts {
        match *part {
            "" | "." => continue,
            ".." => {
                combined.pop();
            }
            part => combined.push(part),
        }
    }
    if parts.first() == Some(&"") {
        combined.insert(0, "");
    }

    match combined.join("/") {
        joined if !joined.is_empty() => joined,
        _ if !combined.is_empty() => "/".to_string(),
        _ => ".".to_string(),
    }
}

/// Parse `key=value&key=value` into an ordered map
///
/// A leading `?` is ignored. Values are percent-decoded with `+` read as a
/// space; a key without `=` maps to an empty string.
pub fn parse_query_string(qs: &str) -> IndexMap<String, String> {
    let qs = qs.strip_prefix('?').unwrap_or(qs);
    let mut map = IndexMap::new();

    for pair in qs.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.replace('+', " ");
        let value = urlencoding::decode(&value)
            .map(|decoded| decoded.into_owned())
            .unwrap_or(value);
        map.insert(key.to_string(), value);
    }

    map
}

/// Append `params` to `url`, percent-encoding each value
///
/// Spaces are encoded as `%20`.
pub fn append_query_string(url: &str, params: &IndexMap<String, String>) -> String {
    let mut url = url.to_string();
    for (key, value) in params {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Whether `url` points at a development host
pub fn is_local_url(url: &str) -> bool {
    LOCAL_HOSTS
        .iter()
        .any(|host| url.contains(&format!("://{host}")))
}

/// File name derived from the host of `url`, e.g. `servicestack.dtos.cs`
/// for `https://openai.servicestack.net`
///
/// Uses the second-to-last DNS label, or the whole host when it has a single
/// label.
///
/// # Errors
///
/// Returns an error if `url` cannot be parsed or has no host.
pub fn host_file_name(url: &str, default_file: &str) -> Result<String, AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let host = parsed.host_str().ok_or_else(|| AppError::InvalidUrl {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;

    let labels: Vec<&str> = host.split('.').collect();
    let label = if labels.len() >= 2 {
        labels[labels.len() - 2]
    } else {
        labels[0]
    };

    Ok(format!("{label}.{default_file}"))
}
