//! Process settings
//!
//! Everything the commands read from the environment is captured once in
//! [`Settings`] so the rest of the program never touches `std::env`.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Set to `1` to disable the anonymous usage ping
pub const TELEMETRY_OPTOUT_ENV: &str = "SERVICESTACK_TELEMETRY_OPTOUT";

const DEFAULT_TOOL_NAME: &str = "get-dtos";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory relative paths are resolved against
    pub cwd: PathBuf,
    /// Name the tool was invoked as, shown in usage text
    pub tool_name: String,
    /// Raw value of [`TELEMETRY_OPTOUT_ENV`]
    pub telemetry_optout: Option<String>,
}

impl Settings {
    /// Read settings from the current process
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_env(program: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            cwd: std::env::current_dir()?,
            tool_name: tool_name(program),
            telemetry_optout: std::env::var(TELEMETRY_OPTOUT_ENV).ok(),
        })
    }

    pub fn telemetry_enabled(&self) -> bool {
        self.telemetry_optout.as_deref() != Some("1")
    }

    /// Resolve `path` against the working directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(path)
    }
}

/// File stem of the program path, e.g. `get-dtos` for `/usr/bin/get-dtos.exe`
fn tool_name(program: Option<&str>) -> String {
    program
        .map(|p| p.replace('\\', "/"))
        .and_then(|p| {
            Path::new(&p)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_TOOL_NAME.to_string())
}
