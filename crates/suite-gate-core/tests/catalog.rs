// crates/suite-gate-core/tests/catalog.rs
// ============================================================================
// Module: Test Catalog Tests
// Description: Registration, selection, id audits, and suite evaluation.
// Purpose: Ensure whole-suite reporting stays complete and ordered.
// ============================================================================
//! ## Overview
//! Integration tests for `TestCatalog`.

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

use suite_gate_core::CatalogError;
use suite_gate_core::ConfigPredicate;
use suite_gate_core::MetadataError;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::TagFilter;
use suite_gate_core::TestBuilder;
use suite_gate_core::TestCatalog;
use suite_gate_core::TestId;
use suite_gate_core::Verdict;
use support::Registries;
use support::TestResult;
use support::ensure;
use support::fake_config;

const ID_A: &str = "453ad4d5-e486-4b2f-be72-cffc8149e586";
const ID_B: &str = "25ba82ee-8a32-4ceb-8f50-8b8c71e8765e";

fn sample_catalog() -> TestResult<TestCatalog> {
    let services = ServiceCatalog::standard();
    let mut catalog = TestCatalog::new();
    catalog.register(
        TestBuilder::new("test_create_server")
            .attr("smoke")
            .services(&services, ["compute"])?
            .idempotent_id(ID_A)?
            .build(),
    )?;
    catalog.register(
        TestBuilder::new("test_create_router")
            .services(&services, ["network"])?
            .idempotent_id(ID_B)?
            .build(),
    )?;
    catalog.register(
        TestBuilder::new("test_feature_flag")
            .attr("slow")
            .skip_unless_config(ConfigPredicate::new("compute-feature-enabled", "resize"))
            .build(),
    )?;
    catalog.register_rejected(
        TestId::new("test_broken"),
        MetadataError::InvalidServiceTag {
            tag: "bad_service".to_string(),
        },
    )?;
    Ok(catalog)
}

#[test]
fn duplicate_registration_is_refused() -> TestResult {
    let mut catalog = sample_catalog()?;
    let result = catalog.register(TestBuilder::new("test_create_server").build());
    ensure(
        result == Err(CatalogError::DuplicateTest(TestId::new("test_create_server"))),
        "Expected duplicate error",
    )?;
    ensure(catalog.len() == 4, "Expected catalog unchanged")?;
    Ok(())
}

#[test]
fn rejected_entries_have_no_definition() -> TestResult {
    let catalog = sample_catalog()?;
    let entry = catalog.get("test_broken").ok_or("missing entry")?;
    ensure(entry.definition().is_none(), "Expected no definition")?;
    ensure(entry.test_id().as_str() == "test_broken", "Unexpected id")?;
    Ok(())
}

#[test]
fn select_filters_by_required_and_excluded_tags() -> TestResult {
    let catalog = sample_catalog()?;
    let smoke: Vec<&str> = catalog
        .select(&TagFilter::new().require("smoke"))
        .into_iter()
        .map(|definition| definition.test_id().as_str())
        .collect();
    ensure(smoke == ["test_create_server"], format!("Unexpected selection: {smoke:?}"))?;
    let not_slow = catalog.select(&TagFilter::new().exclude("slow"));
    ensure(not_slow.len() == 2, "Expected two non-slow tests")?;
    ensure(catalog.select(&TagFilter::new()).len() == 3, "Expected every defined test")?;
    Ok(())
}

#[test]
fn evaluate_reports_every_test_in_id_order() -> TestResult {
    let catalog = sample_catalog()?;
    let config = fake_config().with_option("service_available", "neutron", false);
    let registries = Registries::standard(config);
    let report = catalog.evaluate(&registries.composer(), &TagFilter::new());
    let ids: Vec<&str> = report.entries.iter().map(|entry| entry.test_id.as_str()).collect();
    ensure(
        ids == ["test_broken", "test_create_router", "test_create_server", "test_feature_flag"],
        format!("Unexpected order: {ids:?}"),
    )?;
    ensure(report.totals.run == 1, "Expected one run")?;
    ensure(report.totals.skip == 2, "Expected two skips")?;
    ensure(report.totals.invalid == 1, "Expected one invalid")?;
    ensure(report.has_invalid(), "Expected invalid flag")?;
    ensure(
        report.entries[0].verdict == Verdict::invalid("bad_service is not a valid service"),
        "Expected rejection message",
    )?;
    ensure(
        report.entries[2].idempotent_id.as_deref() == Some(ID_A),
        "Expected idempotent id in report",
    )?;
    Ok(())
}

#[test]
fn rejected_tests_survive_tag_filters() -> TestResult {
    let catalog = sample_catalog()?;
    let registries = Registries::standard(fake_config());
    let report = catalog.evaluate(&registries.composer(), &TagFilter::new().require("smoke"));
    ensure(report.entries.len() == 2, "Expected smoke test plus rejected test")?;
    ensure(report.totals.invalid == 1, "Expected rejected test to be reported")?;
    Ok(())
}

#[test]
fn report_serializes_flat_verdicts() -> TestResult {
    let catalog = sample_catalog()?;
    let registries = Registries::standard(fake_config());
    let report = catalog.evaluate(&registries.composer(), &TagFilter::new().require("smoke"));
    let json = serde_json::to_value(&report)?;
    let first = &json["entries"][0];
    ensure(first["verdict"] == "invalid", "Expected verdict label")?;
    ensure(first["reason"] == "bad_service is not a valid service", "Expected reason")?;
    ensure(json["entries"][1]["verdict"] == "run", "Expected run label")?;
    ensure(json["totals"]["run"] == 1, "Expected totals")?;
    Ok(())
}

#[test]
fn idempotent_id_conflicts_match_by_uuid_value() -> TestResult {
    let mut catalog = sample_catalog()?;
    catalog.register(
        TestBuilder::new("test_copy_paste")
            .idempotent_id(&ID_A.replace('-', "").to_uppercase())?
            .build(),
    )?;
    let conflicts = catalog.idempotent_id_conflicts();
    ensure(conflicts.len() == 1, "Expected one conflict")?;
    ensure(conflicts[0].uuid == ID_A, "Expected canonical uuid")?;
    ensure(
        conflicts[0].tests == [TestId::new("test_copy_paste"), TestId::new("test_create_server")],
        "Expected both tests in id order",
    )?;
    Ok(())
}

#[test]
fn missing_idempotent_ids_lists_defined_tests_only() -> TestResult {
    let catalog = sample_catalog()?;
    let missing: Vec<&str> =
        catalog.missing_idempotent_ids().into_iter().map(TestId::as_str).collect();
    ensure(missing == ["test_feature_flag"], format!("Unexpected: {missing:?}"))?;
    Ok(())
}
