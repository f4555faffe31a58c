use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const SOURCE_ENV_VAR: &str = "LEDGERLENS_SOURCE";
pub const LOG_ENV_VAR: &str = "LEDGERLENS_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Falls back to `LEDGERLENS_SOURCE` when no explicit path was given.
pub fn resolve_default_source() -> ClientResult<Option<PathBuf>> {
    let Some(raw) = std::env::var_os(SOURCE_ENV_VAR) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    absolutize(Path::new(&raw)).map(Some)
}

pub fn log_filter_from_env() -> String {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::source_unreadable(path, &error.to_string()))
}
