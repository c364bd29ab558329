// crates/mail-harness-fixtures/src/generator.rs
// ============================================================================
// Module: Bounded-Chunk File Generator
// Description: Writes files of an exact length from a fixed-size buffer.
// Purpose: Produce oversized attachments without O(N) allocations.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! The generator fills one buffer of at most `chunk_size` bytes and writes it
//! repeatedly until the target length is reached. The final write is exactly
//! the remainder, so any length is supported, including zero.
//! Invariants:
//! - No write is larger than the configured chunk size.
//! - The number of bytes written equals the requested length or an error is
//!   returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

use tracing::debug;

use crate::error::FixtureError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Byte written to every position of a generated file.
pub const FILLER_BYTE: u8 = b'A';

/// Default write buffer size (10 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024;

/// Attachment size cap enforced by Google and Microsoft (25 MiB).
pub const PROVIDER_ATTACHMENT_LIMIT: u64 = 25 * 1024 * 1024;

/// Fixture size used to exceed [`PROVIDER_ATTACHMENT_LIMIT`] (26 MiB).
pub const OVERSIZED_ATTACHMENT_BYTES: u64 = 26 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Generator settings.
///
/// # Invariants
/// - `chunk_size` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Upper bound on the internal buffer and on each write.
    pub chunk_size: NonZeroUsize,
    /// Byte repeated through the file.
    pub filler: u8,
}

impl GeneratorConfig {
    /// Creates a config with an explicit chunk size and filler byte.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ZeroChunkSize`] when `chunk_size` is zero.
    pub fn new(chunk_size: usize, filler: u8) -> Result<Self, FixtureError> {
        let chunk_size = NonZeroUsize::new(chunk_size).ok_or(FixtureError::ZeroChunkSize)?;
        Ok(Self {
            chunk_size,
            filler,
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
            filler: FILLER_BYTE,
        }
    }
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Writes `len` filler bytes into `writer` and returns the count written.
///
/// # Errors
///
/// Returns the writer's I/O error; bytes already written are not rolled back.
pub fn write_filler<W: Write>(
    writer: &mut W,
    len: u64,
    config: &GeneratorConfig,
) -> io::Result<u64> {
    let chunk = config.chunk_size.get();
    let buffer_len = usize::try_from(len).map_or(chunk, |len| len.min(chunk));
    let buffer = vec![config.filler; buffer_len];

    let mut written: u64 = 0;
    while written < len {
        let remaining = len - written;
        let step = usize::try_from(remaining).map_or(buffer.len(), |rem| rem.min(buffer.len()));
        writer.write_all(&buffer[..step])?;
        written += step as u64;
    }
    writer.flush()?;
    Ok(written)
}

/// Creates or truncates `path` and fills it with `len` default filler bytes.
///
/// # Errors
///
/// Returns [`FixtureError`] when the file cannot be created, written, or synced.
pub fn generate_file(path: &Path, len: u64) -> Result<(), FixtureError> {
    generate_file_with(path, len, &GeneratorConfig::default())
}

/// Creates or truncates `path` and fills it according to `config`.
///
/// The file handle is synced and closed before this returns.
///
/// # Errors
///
/// Returns [`FixtureError`] when the file cannot be created, written, or synced.
pub fn generate_file_with(
    path: &Path,
    len: u64,
    config: &GeneratorConfig,
) -> Result<(), FixtureError> {
    let mut file = File::create(path).map_err(|source| FixtureError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let written = write_filler(&mut file, len, config).map_err(|source| FixtureError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.sync_all().map_err(|source| FixtureError::Sync {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = written, chunk = config.chunk_size.get(), "generated fixture");
    Ok(())
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Re-reads `path` in bounded chunks and checks its length and content.
///
/// # Errors
///
/// Returns [`FixtureError::LengthMismatch`] or [`FixtureError::UnexpectedByte`]
/// when the file does not match, or [`FixtureError::Read`] on I/O failure.
pub fn verify_file(path: &Path, len: u64, config: &GeneratorConfig) -> Result<(), FixtureError> {
    let read_err = |source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;
    let actual = file.metadata().map_err(read_err)?.len();
    if actual != len {
        return Err(FixtureError::LengthMismatch {
            path: path.to_path_buf(),
            expected: len,
            actual,
        });
    }

    let mut buffer = vec![0u8; config.chunk_size.get()];
    let mut offset: u64 = 0;
    loop {
        let read = file.read(&mut buffer).map_err(read_err)?;
        if read == 0 {
            break;
        }
        if let Some(index) = buffer[..read].iter().position(|byte| *byte != config.filler) {
            return Err(FixtureError::UnexpectedByte {
                path: path.to_path_buf(),
                offset: offset + index as u64,
                found: buffer[index],
            });
        }
        offset += read as u64;
    }
    if offset != len {
        return Err(FixtureError::LengthMismatch {
            path: path.to_path_buf(),
            expected: len,
            actual: offset,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
