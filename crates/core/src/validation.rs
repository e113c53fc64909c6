//! Input validation for project fields.
//!
//! Used by both the store (on create/update) and any future tooling that
//! imports projects, so the rules live here rather than in the API layer.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a project-relative file path, in characters.
pub const MAX_FILE_PATH_LEN: usize = 1024;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a project name and return it exactly as given.
///
/// Rejects missing and whitespace-only names.
pub fn validate_project_name(name: Option<&str>) -> Result<String, CoreError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(CoreError::Validation("Project name is required".into())),
    }
}

/// Validate that `path` is a project-relative file path.
///
/// - Must be non-empty and at most [`MAX_FILE_PATH_LEN`] characters.
/// - Must not be absolute (leading `/` or `\`).
/// - Must not contain empty, `.` or `..` segments.
pub fn validate_file_path(path: &str) -> Result<(), CoreError> {
    if path.is_empty() {
        return Err(CoreError::Validation("File path must not be empty".into()));
    }
    if path.chars().count() > MAX_FILE_PATH_LEN {
        return Err(CoreError::Validation(format!(
            "File path must be at most {MAX_FILE_PATH_LEN} characters"
        )));
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(CoreError::Validation(format!(
            "File path '{path}' must be relative to the project root"
        )));
    }
    let bad_segment = path
        .split(['/', '\\'])
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad_segment {
        return Err(CoreError::Validation(format!(
            "File path '{path}' contains an empty, '.' or '..' segment"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
