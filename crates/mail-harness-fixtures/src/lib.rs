// crates/mail-harness-fixtures/src/lib.rs
// ============================================================================
// Module: Mail Harness Fixtures
// Description: Sized attachment fixtures for email-service scenarios.
// Purpose: Synthesize files of an exact byte length with bounded memory.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate produces the file fixtures used by attachment-limit scenarios.
//! Files are written in fixed-size chunks so memory use stays bounded by the
//! chunk size, no matter how large the requested file is.
//! Invariants:
//! - A generated file is exactly the requested length.
//! - Every byte of a generated file equals the configured filler byte.
//! - [`SizedFile`] removes its file when dropped, including during unwinding.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod generator;
pub mod sized_file;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::FixtureError;
pub use generator::DEFAULT_CHUNK_SIZE;
pub use generator::FILLER_BYTE;
pub use generator::GeneratorConfig;
pub use generator::OVERSIZED_ATTACHMENT_BYTES;
pub use generator::PROVIDER_ATTACHMENT_LIMIT;
pub use generator::generate_file;
pub use generator::generate_file_with;
pub use generator::verify_file;
pub use generator::write_filler;
pub use sized_file::SizedFile;
