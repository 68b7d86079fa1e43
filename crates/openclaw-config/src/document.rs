// crates/openclaw-config/src/document.rs
// ============================================================================
// Module: Configuration Documents
// Description: Bounded JSON document loading and atomic saving.
// Purpose: Read a whole config file into memory and replace it in one step.
// Dependencies: serde_json, tempfile, thiserror
// ============================================================================

//! ## Overview
//! Configuration documents are read wholesale, parsed as JSON, and written
//! back wholesale. Reads are bounded by [`MAX_DOCUMENT_SIZE`] and must be
//! UTF-8. Writes go to a temporary file in the destination directory which is
//! then renamed over the target, so a failed write leaves the original intact.
//!
//! ## Invariants
//! - Key order of JSON objects is preserved across a load/save cycle.
//! - Saved documents are pretty-printed with two-space indentation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration document size in bytes.
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or saving configuration documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// I/O failure while reading or writing a document.
    #[error("config io error: {0}")]
    Io(String),
    /// JSON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Document rejected before parsing.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Load / Save
// ============================================================================

/// Loads a JSON document from disk.
///
/// # Errors
///
/// Returns [`DocumentError`] when the file cannot be read, exceeds the size
/// limit, is not UTF-8, or is not valid JSON.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let bytes = fs::read(path)
        .map_err(|err| DocumentError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(DocumentError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| DocumentError::Invalid("config file must be utf-8".to_string()))?;
    serde_json::from_str(content)
        .map_err(|err| DocumentError::Parse(format!("{}: {err}", path.display())))
}

/// Renders a document the way it is stored on disk.
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] when serialization fails.
pub fn render_document(document: &Value) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(document).map_err(|err| DocumentError::Parse(err.to_string()))
}

/// Atomically replaces `path` with the pretty-printed document.
///
/// When `path` is a symlink the link target is replaced and the link is kept.
/// The existing file's permissions carry over to the new contents.
///
/// # Errors
///
/// Returns [`DocumentError`] when serialization, link resolution, the
/// temporary write, the permission copy, or the final rename fails. The
/// original file is untouched on failure.
pub fn save_document(path: &Path, document: &Value) -> Result<(), DocumentError> {
    let rendered = render_document(document)?;
    let target = resolve_target(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(parent)
        .map_err(|err| DocumentError::Io(format!("{}: {err}", parent.display())))?;
    staged
        .write_all(rendered.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|err| DocumentError::Io(format!("{}: {err}", staged.path().display())))?;
    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(staged.path(), metadata.permissions())
            .map_err(|err| DocumentError::Io(format!("{}: {err}", staged.path().display())))?;
    }
    staged
        .persist(&target)
        .map_err(|err| DocumentError::Io(format!("{}: {}", target.display(), err.error)))?;
    Ok(())
}

/// Follows `path` to the file that should be replaced.
fn resolve_target(path: &Path) -> Result<PathBuf, DocumentError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(path)
            .map_err(|err| DocumentError::Io(format!("{}: {err}", path.display()))),
        _ => Ok(path.to_path_buf()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
