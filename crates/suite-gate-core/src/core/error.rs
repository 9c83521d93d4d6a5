// crates/suite-gate-core/src/core/error.rs
// ============================================================================
// Module: Metadata Errors
// Description: Decoration-time failures for malformed test metadata.
// Purpose: Report programmer errors in test definitions before execution.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Malformed metadata is a test-suite bug, never an environment condition.
//! These errors are returned by the builder while decorators apply and are
//! surfaced as hard failures (or as `Invalid` verdicts for catalogued tests).

use thiserror::Error;

/// Errors raised while attaching metadata to a test.
///
/// # Invariants
/// - Every variant names the decorator argument that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// Idempotent id was not a string (type error class).
    #[error("Test idempotent_id must be string but {found}")]
    IdempotentIdNotString {
        /// Type name of the rejected value.
        found: &'static str,
    },
    /// Idempotent id was a string but not a UUID (value error class).
    #[error("invalid idempotent id {value}: {reason}")]
    InvalidIdempotentId {
        /// Rejected identifier.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Idempotent id was attached twice to the same test.
    #[error("idempotent id already set to {existing}")]
    IdempotentIdAlreadySet {
        /// Identifier attached first.
        existing: String,
    },
    /// Service name missing from the service catalog.
    #[error("{tag} is not a valid service")]
    InvalidServiceTag {
        /// Rejected service name.
        tag: String,
    },
    /// `attr(type=...)` value was neither a tag nor a list of tags.
    #[error("attr type must be a string or a list of strings but {found}")]
    InvalidAttrType {
        /// Type name of the rejected value.
        found: &'static str,
    },
    /// `stresstest(class_setup_per=...)` value was not a known frequency.
    #[error("class_setup_per must be 'process' or 'application' but got {value}")]
    InvalidClassSetupFrequency {
        /// Rejected value.
        value: String,
    },
    /// A decorator argument was missing or of the wrong shape.
    #[error("{decorator}: invalid argument {argument}: {reason}")]
    InvalidArgument {
        /// Decorator name.
        decorator: &'static str,
        /// Argument name.
        argument: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
}
