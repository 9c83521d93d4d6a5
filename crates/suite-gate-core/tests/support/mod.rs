// crates/suite-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared fixtures and result helpers for gating engine tests.
// ============================================================================
//! ## Overview
//! Shared configuration fixtures and Result-based assertions.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test helpers are selectively used across suites."
)]

use std::error::Error;
use std::fmt;

use suite_gate_core::ConfigSnapshot;
use suite_gate_core::DecisionComposer;
use suite_gate_core::ExtensionRegistry;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::ServiceRegistry;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across gating engine tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Configuration Fixtures
// ========================================================================

/// Configuration with every standard service available and two compute extensions.
pub fn fake_config() -> ConfigSnapshot {
    [
        "ironic",
        "nova",
        "horizon",
        "sahara",
        "trove",
        "glance",
        "neutron",
        "swift",
        "heat",
        "ceilometer",
        "cinder",
    ]
    .into_iter()
    .fold(ConfigSnapshot::new(), |config, option| {
        config.with_option("service_available", option, true)
    })
    .with_option("compute-feature-enabled", "api_extensions", vec!["enabled_ext", "another_ext"])
}

/// Owned registries for a snapshot; borrow them into a composer with [`Registries::composer`].
pub struct Registries {
    /// Service availability.
    pub services: ServiceRegistry,
    /// Enabled extensions.
    pub extensions: ExtensionRegistry,
    /// Configuration snapshot.
    pub config: ConfigSnapshot,
}

impl Registries {
    /// Resolves the standard registries from `config`.
    pub fn standard(config: ConfigSnapshot) -> Self {
        Self {
            services: ServiceRegistry::resolve(&ServiceCatalog::standard(), &config),
            extensions: ExtensionRegistry::standard(&config),
            config,
        }
    }

    /// Returns a composer borrowing the registries.
    pub const fn composer(&self) -> DecisionComposer<'_> {
        DecisionComposer::new(&self.services, &self.extensions, &self.config)
    }
}
