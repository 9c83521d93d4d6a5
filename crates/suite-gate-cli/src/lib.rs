// crates/suite-gate-cli/src/lib.rs
// ============================================================================
// Module: Suite Gate CLI Library
// Description: Shared helpers for the Suite Gate command-line interface.
// Purpose: Keep report rendering reusable by the binary and its tests.
// Dependencies: suite-gate-core, serde
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) loads configuration and manifests;
//! this library turns the resulting reports into text or JSON.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod render;

#[cfg(test)]
mod tests;
