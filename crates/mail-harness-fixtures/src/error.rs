// crates/mail-harness-fixtures/src/error.rs
// ============================================================================
// Module: Fixture Errors
// Description: Error type for fixture generation and cleanup.
// Purpose: Carry the failing path alongside the underlying I/O error.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every I/O failure carries the fixture path it happened on.
//! Invariants:
//! - Verification failures report the first offending offset or length.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while generating, verifying, or removing fixtures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - A failed generation never reports success for a truncated file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The chunk size was zero.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    /// The destination file could not be created.
    #[error("failed to create fixture {path}: {source}")]
    Create {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing filler bytes failed part way through.
    #[error("failed to write fixture {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Flushing the file to disk failed.
    #[error("failed to sync fixture {path}: {source}")]
    Sync {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Reading the fixture back failed.
    #[error("failed to read fixture {path}: {source}")]
    Read {
        /// Fixture path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The fixture length on disk differs from the expected length.
    #[error("fixture {path} is {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Fixture path.
        path: PathBuf,
        /// Expected length in bytes.
        expected: u64,
        /// Observed length in bytes.
        actual: u64,
    },
    /// The fixture contains a byte other than the filler.
    #[error("fixture {path} has unexpected byte {found:#04x} at offset {offset}")]
    UnexpectedByte {
        /// Fixture path.
        path: PathBuf,
        /// Offset of the first unexpected byte.
        offset: u64,
        /// The byte found at that offset.
        found: u8,
    },
    /// The fixture could not be removed.
    #[error("failed to remove fixture {path}: {source}")]
    Remove {
        /// Fixture path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
