// crates/suite-gate-core/src/lib.rs
// ============================================================================
// Module: Suite Gate Core Library
// Description: Public API surface for the test metadata and gating engine.
// Purpose: Expose metadata types, registries, and the decision composer.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Suite Gate decides, before a test body runs, whether the test should run,
//! be skipped, or be rejected as malformed. Decorator-style builder calls
//! attach tags, an idempotent id, service dependencies, extension and
//! configuration gates; a [`DecisionComposer`] folds the stacked gates into a
//! single [`Verdict`] against immutable registries.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use runtime::CatalogEntry;
pub use runtime::CatalogError;
pub use runtime::DecisionComposer;
pub use runtime::DecisionTrace;
pub use runtime::GateTraceEntry;
pub use runtime::IdConflict;
pub use runtime::Invocation;
pub use runtime::NoopTrace;
pub use runtime::RecordingTrace;
pub use runtime::SuiteEntry;
pub use runtime::SuiteReport;
pub use runtime::TagFilter;
pub use runtime::TestBuilder;
pub use runtime::TestCatalog;
pub use runtime::TestDefinition;
pub use runtime::VerdictTotals;
