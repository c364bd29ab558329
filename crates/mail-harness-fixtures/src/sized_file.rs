// crates/mail-harness-fixtures/src/sized_file.rs
// ============================================================================
// Module: Sized File Guard
// Description: Owned handle for a generated fixture file.
// Purpose: Tie fixture lifetime to scope so cleanup runs on every path.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`SizedFile`] generates a fixture on creation and deletes it when dropped.
//! Callers that need to observe cleanup failures call [`SizedFile::remove`];
//! the drop path is best-effort and only logs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::error::FixtureError;
use crate::generator::GeneratorConfig;
use crate::generator::generate_file_with;
use crate::generator::verify_file;

// ============================================================================
// SECTION: Sized File
// ============================================================================

/// A generated fixture file of an exact length.
///
/// # Invariants
/// - The file at `path` held `len` filler bytes when this value was created.
/// - The file is removed at most once, either explicitly or on drop.
#[derive(Debug)]
pub struct SizedFile {
    /// Location of the fixture.
    path: PathBuf,
    /// Length the fixture was generated with.
    len: u64,
    /// Generator settings used to create the fixture.
    config: GeneratorConfig,
    /// Set once the file has been removed explicitly.
    removed: bool,
}

impl SizedFile {
    /// Generates a fixture of `len` bytes at `path` using default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when generation fails; no guard is returned and
    /// any partially written file is removed.
    pub fn create(path: impl Into<PathBuf>, len: u64) -> Result<Self, FixtureError> {
        Self::create_with(path, len, GeneratorConfig::default())
    }

    /// Generates a fixture of `len` bytes at `path` using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when generation fails.
    pub fn create_with(
        path: impl Into<PathBuf>,
        len: u64,
        config: GeneratorConfig,
    ) -> Result<Self, FixtureError> {
        let path = path.into();
        if let Err(err) = generate_file_with(&path, len, &config) {
            if !matches!(err, FixtureError::Create { .. }) {
                remove_best_effort(&path);
            }
            return Err(err);
        }
        Ok(Self {
            path,
            len,
            config,
            removed: false,
        })
    }

    /// Returns the fixture path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the fixture length in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns true when the fixture is zero bytes long.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks that the file on disk still matches the requested length and filler.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the file is missing, resized, or altered.
    pub fn verify(&self) -> Result<(), FixtureError> {
        verify_file(&self.path, self.len, &self.config)
    }

    /// Deletes the fixture and reports any failure.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Remove`] when the file cannot be deleted.
    pub fn remove(mut self) -> Result<(), FixtureError> {
        self.removed = true;
        fs::remove_file(&self.path).map_err(|source| FixtureError::Remove {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for SizedFile {
    fn drop(&mut self) {
        if !self.removed {
            remove_best_effort(&self.path);
        }
    }
}

/// Removes `path`, logging any failure other than the file being absent.
///
/// Returns the logged error.
pub(crate) fn remove_best_effort(path: &Path) -> Option<io::Error> {
    match fs::remove_file(path) {
        Ok(()) => None,
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "fixture cleanup failed");
            Some(err)
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "sized_file_tests.rs"]
mod tests;
