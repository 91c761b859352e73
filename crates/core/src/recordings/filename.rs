//! Validation of caller-supplied recording filenames.
//!
//! Runs before any filesystem write. Names are rejected rather than
//! rewritten so the caller's notion of the recording name stays in sync
//! with what lands on disk.

use crate::error::CoreError;

/// Maximum length of a recording filename.
const MAX_FILENAME_LEN: usize = 255;

/// Validate a caller-supplied recording filename.
///
/// Rules:
/// - Must not be empty.
/// - Must not exceed `MAX_FILENAME_LEN` bytes.
/// - Must not contain path separators (`/`, `\`) or NUL bytes.
/// - Must not be a traversal component (`.` or `..`).
/// - Must not be a hidden or system file name.
pub fn validate(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Recording filename must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_FILENAME_LEN {
        return Err(CoreError::Validation(format!(
            "Recording filename must not exceed {MAX_FILENAME_LEN} bytes"
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(CoreError::Validation(
            "Recording filename must not contain path separators".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(CoreError::Validation(
            "Recording filename must not be a path component".to_string(),
        ));
    }
    if is_hidden_or_system(name) {
        return Err(CoreError::Validation(
            "Recording filename must not be a hidden or system file".to_string(),
        ));
    }
    Ok(())
}

/// Returns `true` if the file name represents a hidden or system file.
pub fn is_hidden_or_system(file_name: &str) -> bool {
    file_name.starts_with('.')
        || file_name == "Thumbs.db"
        || file_name == "desktop.ini"
}
