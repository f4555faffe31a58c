use std::fs;
use std::io::{IsTerminal, Read};
use std::path::Path;

use tracing::debug;

use crate::config::resolve_default_source;
use crate::ingest::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

/// A file path never consults stdin; `-` or an absent path does.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    if let Some(path_value) = path {
        if path_value != "-" {
            return read_file_source(Path::new(&path_value));
        }

        if let Some(stdin_value) = read_stdin(stdin_override)? {
            return Ok(stdin_source(stdin_value));
        }

        return Err(invalid_input_error(
            "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path.",
        ));
    }

    if let Some(stdin_value) = read_stdin(stdin_override)? {
        return Ok(stdin_source(stdin_value));
    }

    if let Some(default_path) = resolve_default_source()? {
        debug!(path = %default_path.display(), "using source from environment");
        return read_file_source(&default_path);
    }

    Err(invalid_input_error(
        "No transaction source provided. Pass a file path, pipe input via stdin, or set LEDGERLENS_SOURCE.",
    ))
}

fn stdin_source(content: String) -> ResolvedSource {
    ResolvedSource {
        source_kind: SourceKind::Stdin,
        source_ref: None,
        content,
    }
}

fn read_file_source(path: &Path) -> ClientResult<ResolvedSource> {
    let content = fs::read_to_string(path)
        .map_err(|error| ClientError::source_unreadable(path, &error.to_string()))?;

    Ok(ResolvedSource {
        source_kind: SourceKind::File,
        source_ref: Some(path.display().to_string()),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    Ok(non_blank(buffer))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}
