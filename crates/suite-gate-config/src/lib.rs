// crates/suite-gate-config/src/lib.rs
// ============================================================================
// Module: Suite Gate Config Library
// Description: Configuration snapshot loading and suite manifests.
// Purpose: Single source of truth for suite-gate.toml and manifest semantics.
// Dependencies: suite-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `suite-gate-config` turns files on disk into the immutable inputs of the
//! gating engine: a [`SuiteGateConfig`] (the configuration snapshot plus the
//! registries resolved from it) and a [`SuiteManifest`] (test definitions
//! with their decorator stacks). Both loaders fail closed on oversized,
//! non-UTF-8 or malformed input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod manifest;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use manifest::*;
