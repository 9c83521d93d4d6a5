// crates/suite-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Suite Gate Runtime
// Description: Definition-time builder and execution-time composer.
// Purpose: Turn decorated definitions into verdicts.
// Dependencies: crate::runtime::{builder, catalog, composer, trace}
// ============================================================================

//! ## Overview
//! Runtime helpers: build definitions, catalogue them, and evaluate them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builder;
pub mod catalog;
pub mod composer;
pub mod trace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::TestBuilder;
pub use builder::TestDefinition;
pub use catalog::CatalogEntry;
pub use catalog::CatalogError;
pub use catalog::IdConflict;
pub use catalog::SuiteEntry;
pub use catalog::SuiteReport;
pub use catalog::TagFilter;
pub use catalog::TestCatalog;
pub use catalog::VerdictTotals;
pub use composer::DecisionComposer;
pub use composer::Invocation;
pub use trace::DecisionTrace;
pub use trace::GateTraceEntry;
pub use trace::NoopTrace;
pub use trace::RecordingTrace;
