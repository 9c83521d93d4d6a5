// crates/suite-gate-core/tests/services_gate.rs
// ============================================================================
// Module: Services Gate Tests
// Description: Decoration and evaluation of service dependencies.
// Purpose: Ensure tags, validation, and availability skips behave.
// ============================================================================
//! ## Overview
//! Integration tests for `TestBuilder::services` and the service gate.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::indexing_slicing,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::cell::Cell;

use suite_gate_core::AvailabilitySource;
use suite_gate_core::ExtensionRegistry;
use suite_gate_core::Invocation;
use suite_gate_core::MetadataError;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::ServiceRegistry;
use suite_gate_core::TestBuilder;
use suite_gate_core::TestDefinition;
use suite_gate_core::Verdict;
use support::Registries;
use support::TestResult;
use support::ensure;
use support::fake_config;

fn decorated(services: &[&str]) -> Result<TestDefinition, MetadataError> {
    Ok(TestBuilder::new("test_bar").services(&ServiceCatalog::standard(), services)?.build())
}

#[test]
fn services_become_tags_and_run_when_available() -> TestResult {
    let definition = decorated(&["compute", "network"])?;
    let tags: Vec<&str> = definition.metadata().tags().iter().map(String::as_str).collect();
    ensure(tags == ["compute", "network"], format!("Unexpected tags: {tags:?}"))?;
    let registries = Registries::standard(fake_config());
    ensure(registries.composer().evaluate(&definition) == Verdict::Run, "Expected run")?;
    Ok(())
}

#[test]
fn every_standard_service_is_accepted() -> TestResult {
    let catalog = ServiceCatalog::standard();
    let registries = Registries::standard(fake_config());
    for (tag, _) in catalog.iter() {
        let definition = decorated(&[tag.as_str()])?;
        ensure(definition.metadata().has_tag(tag.as_str()), format!("Missing tag {tag}"))?;
        ensure(
            registries.composer().evaluate(&definition) == Verdict::Run,
            format!("Expected {tag} to run with every service available"),
        )?;
    }
    Ok(())
}

#[test]
fn unavailable_service_skips_naming_it() -> TestResult {
    let config = fake_config().with_option("service_available", "neutron", false);
    let registries = Registries::standard(config);
    let definition = decorated(&["compute", "network"])?;
    ensure(
        registries.composer().evaluate(&definition)
            == Verdict::skip("Skipped because the network service is not available"),
        "Expected network skip",
    )?;
    Ok(())
}

#[test]
fn first_unavailable_service_in_declaration_order_wins() -> TestResult {
    let config = fake_config()
        .with_option("service_available", "neutron", false)
        .with_option("service_available", "cinder", false);
    let registries = Registries::standard(config);
    let definition = decorated(&["volume", "network"])?;
    ensure(
        registries.composer().evaluate(&definition)
            == Verdict::skip("Skipped because the volume service is not available"),
        "Expected volume skip",
    )?;
    Ok(())
}

#[test]
fn identity_is_always_available() -> TestResult {
    let registries = Registries::standard(suite_gate_core::ConfigSnapshot::new());
    let definition = decorated(&["identity"])?;
    ensure(registries.composer().evaluate(&definition) == Verdict::Run, "Expected run")?;
    Ok(())
}

#[test]
fn invalid_service_is_rejected_at_decoration() -> TestResult {
    let result = decorated(&["compute", "bad_service"]);
    ensure(
        matches!(result, Err(MetadataError::InvalidServiceTag { ref tag }) if tag == "bad_service"),
        "Expected invalid service tag",
    )?;
    ensure(
        MetadataError::InvalidServiceTag {
            tag: "bad_service".to_string(),
        }
        .to_string()
            == "bad_service is not a valid service",
        "Unexpected message",
    )?;
    Ok(())
}

#[test]
fn duplicate_services_collapse_in_tags() -> TestResult {
    let definition = decorated(&["compute", "compute"])?;
    ensure(definition.metadata().tags().len() == 1, "Expected one tag")?;
    ensure(definition.metadata().required_services().len() == 1, "Expected one service")?;
    Ok(())
}

#[test]
fn registered_service_without_availability_is_invalid() -> TestResult {
    let registries = Registries::standard(suite_gate_core::ConfigSnapshot::new());
    let definition = decorated(&["compute"])?;
    let verdict = registries.composer().evaluate(&definition);
    ensure(verdict.is_invalid(), format!("Expected invalid, got {verdict}"))?;
    Ok(())
}

#[test]
fn service_missing_from_execution_registry_is_invalid() -> TestResult {
    let definition = decorated(&["compute"])?;
    let config = fake_config();
    let registries = Registries {
        services: ServiceRegistry::resolve(&ServiceCatalog::new(), &config),
        extensions: ExtensionRegistry::standard(&config),
        config,
    };
    let verdict = registries.composer().evaluate(&definition);
    ensure(
        verdict == Verdict::invalid("compute is not a registered service"),
        format!("Expected unregistered service to be invalid, got {verdict}"),
    )?;
    let ran = Cell::new(false);
    let outcome: Invocation<(), ()> = registries.composer().invoke(&definition, || {
        ran.set(true);
        Ok(())
    });
    ensure(!ran.get(), "Expected body not to run")?;
    ensure(
        outcome == Invocation::Rejected("compute is not a registered service".to_string()),
        "Expected rejected outcome",
    )?;
    Ok(())
}

#[test]
fn custom_catalog_entries_resolve_from_service_available() -> TestResult {
    let catalog = ServiceCatalog::new().with_service(
        "load_balancer",
        "Load Balancer",
        AvailabilitySource::Config("octavia".to_string()),
    );
    let config = suite_gate_core::ConfigSnapshot::new().with_option(
        "service_available",
        "octavia",
        false,
    );
    let registry = ServiceRegistry::resolve(&catalog, &config);
    ensure(registry.availability("load_balancer") == Ok(false), "Expected unavailable")?;
    ensure(registry.availability("compute").is_err(), "Expected compute to be unknown")?;
    Ok(())
}
