// crates/suite-gate-cli/src/tests.rs
// ============================================================================
// Module: CLI Rendering Tests
// Description: Unit tests for report rendering.
// Purpose: Pin the text layout the binary prints.
// Dependencies: suite-gate-cli render helpers
// ============================================================================

//! ## Overview
//! Validates text renderings of suite reports, services, and id audits.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use suite_gate_core::AvailabilitySource;
use suite_gate_core::ConfigSnapshot;
use suite_gate_core::DecisionComposer;
use suite_gate_core::ExtensionRegistry;
use suite_gate_core::MetadataError;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::ServiceRegistry;
use suite_gate_core::TagFilter;
use suite_gate_core::TestBuilder;
use suite_gate_core::TestCatalog;
use suite_gate_core::TestId;

use crate::render::IdAudit;
use crate::render::id_audit_text;
use crate::render::service_rows;
use crate::render::services_text;
use crate::render::suite_report_text;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn sample_catalog() -> TestCatalog {
    let services = ServiceCatalog::standard();
    let mut catalog = TestCatalog::new();
    catalog
        .register(
            TestBuilder::new("test_compute")
                .services(&services, ["compute"])
                .unwrap()
                .idempotent_id("453ad4d5-e486-4b2f-be72-cffc8149e586")
                .unwrap()
                .build(),
        )
        .unwrap();
    catalog
        .register(TestBuilder::new("test_network").services(&services, ["network"]).unwrap().build())
        .unwrap();
    catalog
        .register_rejected(
            TestId::new("test_broken"),
            MetadataError::InvalidServiceTag {
                tag: "bad_service".to_string(),
            },
        )
        .unwrap();
    catalog
}

fn config() -> ConfigSnapshot {
    ConfigSnapshot::new()
        .with_option("service_available", "nova", true)
        .with_option("service_available", "neutron", false)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn suite_report_text_lists_verdicts_and_totals() {
    let config = config();
    let services = ServiceRegistry::resolve(&ServiceCatalog::standard(), &config);
    let extensions = ExtensionRegistry::standard(&config);
    let composer = DecisionComposer::new(&services, &extensions, &config);
    let report = sample_catalog().evaluate(&composer, &TagFilter::new());
    assert_eq!(
        suite_report_text(&report),
        "test_broken ... invalid: bad_service is not a valid service\n\
         test_compute ... run\n\
         test_network ... skip: Skipped because the network service is not available\n\
         totals: run=1 skip=1 invalid=1"
    );
}

#[test]
fn suite_report_text_for_empty_suite_is_totals_only() {
    let config = config();
    let services = ServiceRegistry::resolve(&ServiceCatalog::standard(), &config);
    let extensions = ExtensionRegistry::standard(&config);
    let composer = DecisionComposer::new(&services, &extensions, &config);
    let report = TestCatalog::new().evaluate(&composer, &TagFilter::new());
    assert_eq!(suite_report_text(&report), "totals: run=0 skip=0 invalid=0");
}

#[test]
fn services_text_aligns_columns() {
    let catalog = ServiceCatalog::new()
        .with_service("compute", "Compute", AvailabilitySource::Config("nova".to_string()))
        .with_service("identity", "Identity", AvailabilitySource::Always)
        .with_service("network", "Network", AvailabilitySource::Config("x".to_string()));
    let registry = ServiceRegistry::resolve(&catalog, &config());
    assert_eq!(
        services_text(&service_rows(&registry)),
        "compute   Compute   available\n\
         identity  Identity  available\n\
         network   Network   unresolved"
    );
}

#[test]
fn id_audit_reports_missing_ids() {
    let audit = IdAudit::from_catalog(&sample_catalog());
    assert!(!audit.has_conflicts());
    assert_eq!(id_audit_text(&audit), "missing idempotent id: test_network\nduplicates=0 missing=1");
}
