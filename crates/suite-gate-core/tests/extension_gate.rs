// crates/suite-gate-core/tests/extension_gate.rs
// ============================================================================
// Module: Extension Gate Tests
// Description: Evaluation of `requires_ext` against extension registries.
// Purpose: Ensure enabled, disabled, wildcard, and unknown service cases.
// ============================================================================
//! ## Overview
//! Integration tests for the `requires_ext` gate.

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

use suite_gate_core::ExtensionSet;
use suite_gate_core::TestBuilder;
use suite_gate_core::Verdict;
use support::Registries;
use support::TestResult;
use support::ensure;
use support::fake_config;

fn verdict_for(registries: &Registries, extension: &str, service: &str) -> Verdict {
    let definition = TestBuilder::new("test_foo").requires_ext(extension, service).build();
    registries.composer().evaluate(&definition)
}

#[test]
fn enabled_extension_runs() -> TestResult {
    let registries = Registries::standard(fake_config());
    ensure(verdict_for(&registries, "enabled_ext", "compute") == Verdict::Run, "Expected run")?;
    ensure(verdict_for(&registries, "another_ext", "compute") == Verdict::Run, "Expected run")?;
    Ok(())
}

#[test]
fn requires_ext_adds_no_tags() -> TestResult {
    let definition = TestBuilder::new("test_foo").requires_ext("enabled_ext", "compute").build();
    ensure(definition.metadata().tags().is_empty(), "Expected no tags")?;
    ensure(definition.gates().len() == 1, "Expected one gate")?;
    Ok(())
}

#[test]
fn disabled_extension_skips() -> TestResult {
    let registries = Registries::standard(fake_config());
    ensure(
        verdict_for(&registries, "not_enabled", "compute")
            == Verdict::skip("Skipped because compute extension: not_enabled is not enabled"),
        "Expected extension skip",
    )?;
    Ok(())
}

#[test]
fn wildcard_enables_everything() -> TestResult {
    let config =
        fake_config().with_option("compute-feature-enabled", "api_extensions", vec!["all"]);
    let registries = Registries::standard(config);
    ensure(verdict_for(&registries, "anything", "compute") == Verdict::Run, "Expected run")?;
    Ok(())
}

#[test]
fn wildcard_only_counts_in_first_position() -> TestResult {
    let config = fake_config().with_option(
        "compute-feature-enabled",
        "api_extensions",
        vec!["enabled_ext", "all"],
    );
    let registries = Registries::standard(config);
    ensure(verdict_for(&registries, "anything", "compute").is_skip(), "Expected skip")?;
    Ok(())
}

#[test]
fn empty_extension_list_enables_nothing() -> TestResult {
    let config = fake_config().with_option(
        "network-feature-enabled",
        "api_extensions",
        Vec::<&str>::new(),
    );
    let registries = Registries::standard(config);
    ensure(verdict_for(&registries, "router", "network").is_skip(), "Expected skip")?;
    Ok(())
}

#[test]
fn unknown_service_is_invalid() -> TestResult {
    let registries = Registries::standard(fake_config());
    let verdict = verdict_for(&registries, "enabled_ext", "bad_service");
    ensure(verdict.is_invalid(), format!("Expected invalid, got {verdict}"))?;
    Ok(())
}

#[test]
fn object_service_reads_discoverable_apis() -> TestResult {
    let config = fake_config().with_option(
        "object-storage-feature-enabled",
        "discoverable_apis",
        vec!["tempurl", "slo"],
    );
    let registries = Registries::standard(config);
    ensure(verdict_for(&registries, "slo", "object") == Verdict::Run, "Expected run")?;
    ensure(verdict_for(&registries, "bulk", "object").is_skip(), "Expected skip")?;
    Ok(())
}

#[test]
fn extension_set_wildcard_rule() -> TestResult {
    ensure(ExtensionSet::from_list(["all"]) == ExtensionSet::All, "Expected wildcard")?;
    ensure(!ExtensionSet::from_list(Vec::<&str>::new()).is_enabled("x"), "Expected disabled")?;
    ensure(ExtensionSet::from_list(["x", "y"]).is_enabled("y"), "Expected enabled")?;
    Ok(())
}
