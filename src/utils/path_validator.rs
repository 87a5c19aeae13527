use crate::error::{BumpError, Result};
use std::path::{Path, PathBuf};

/// Path checks run before the manifest is read or written.
pub struct PathValidator;

impl PathValidator {
    /// Validates and canonicalises the manifest path.
    ///
    /// A missing file is reported as [`BumpError::FileNotFound`] so the caller
    /// can abort before anything else happens.
    pub fn validate_manifest_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BumpError::FileNotFound(path.to_path_buf()));
        }

        let canonical = path.canonicalize().map_err(|e| {
            BumpError::Config(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_file() {
            return Err(BumpError::Config(format!(
                "Path '{}' is not a file",
                canonical.display()
            )));
        }

        Ok(canonical)
    }
}
