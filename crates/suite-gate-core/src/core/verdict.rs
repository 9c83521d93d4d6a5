// crates/suite-gate-core/src/core/verdict.rs
// ============================================================================
// Module: Verdicts
// Description: Pre-execution decision handed to the external test runner.
// Purpose: Replace exception-based skip signalling with a tagged result.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Verdict`] is computed once per test before its body runs. `Skip` is an
//! expected environment condition; `Invalid` is malformed metadata and must
//! be reported as a failure.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Pre-execution decision for one test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Execute the test body.
    Run,
    /// Do not execute; not a failure.
    Skip(String),
    /// Do not execute; the test definition is malformed.
    Invalid(String),
}

impl Verdict {
    /// Creates a skip verdict.
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip(reason.into())
    }

    /// Creates an invalid verdict.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// Returns true for `Run`.
    #[must_use]
    pub const fn is_run(&self) -> bool {
        matches!(self, Self::Run)
    }

    /// Returns true for `Skip`.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }

    /// Returns true for `Invalid`.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the reason for `Skip` and `Invalid`.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Run => None,
            Self::Skip(reason) | Self::Invalid(reason) => Some(reason),
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Skip(_) => "skip",
            Self::Invalid(_) => "invalid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {reason}", self.label()),
            None => f.write_str(self.label()),
        }
    }
}
