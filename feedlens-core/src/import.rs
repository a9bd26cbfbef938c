//! Import normalization: raw file content → analyzable feedback text.
//!
//! Feedback is analyzed one line per entry. Some spreadsheet exports write a
//! single row with comma-separated cells and no line breaks at all; for `.csv`
//! files in that shape every comma becomes a line break. This also splits
//! quoted cells that contain commas, which is a known limitation of the
//! heuristic.

use std::path::Path;

use thiserror::Error;

/// Delimiter used by the single-line CSV fallback.
pub const CSV_DELIMITER: char = ',';

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Structured import failures, displayable in both CLI and TUI.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid UTF-8 text (invalid byte at offset {offset})")]
    Undecodable { offset: usize },

    #[error("unsupported file type '{name}' (expected .txt or .csv)")]
    UnsupportedExtension { name: String },

    #[error("could not read '{name}': {reason}")]
    Unreadable { name: String, reason: String },
}

/// File kinds the import accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    PlainText,
    Delimited,
}

impl ImportKind {
    /// Classify a filename by extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(ImportKind::PlainText),
            "csv" => Some(ImportKind::Delimited),
            _ => None,
        }
    }
}

/// Normalized import output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImport {
    /// Trimmed text, one feedback per line.
    pub text: String,
    /// Number of non-blank lines.
    pub line_count: usize,
}

/// Normalize raw file bytes into feedback text.
pub fn normalize(raw: &[u8], filename: &str) -> Result<NormalizedImport, ImportError> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let content = std::str::from_utf8(raw).map_err(|e| ImportError::Undecodable {
        offset: e.valid_up_to(),
    })?;
    Ok(normalize_str(content, filename))
}

/// Normalize already-decoded content.
pub fn normalize_str(content: &str, filename: &str) -> NormalizedImport {
    // A one-line CSV is read as one feedback per field. Quoting is not
    // honored, so commas inside a quoted field split it as well.
    let split_record = !content.contains('\n')
        && ImportKind::from_filename(filename) == Some(ImportKind::Delimited);

    let normalized = if split_record {
        content.replace(CSV_DELIMITER, "\n")
    } else {
        content.to_string()
    };

    NormalizedImport {
        line_count: count_nonblank_lines(&normalized),
        text: normalized.trim().to_string(),
    }
}

/// Count lines (split on `\n` or `\r\n`) holding anything besides whitespace.
pub fn count_nonblank_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Read a file from disk and normalize it.
pub fn import_file(path: &Path) -> Result<NormalizedImport, ImportError> {
    let name = display_name(path);
    if ImportKind::from_filename(&name).is_none() {
        return Err(ImportError::UnsupportedExtension { name });
    }
    let raw = std::fs::read(path).map_err(|e| ImportError::Unreadable {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    let normalized = normalize(&raw, &name)?;
    tracing::debug!(file = %name, lines = normalized.line_count, "normalized import");
    Ok(normalized)
}

/// Final path component, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
