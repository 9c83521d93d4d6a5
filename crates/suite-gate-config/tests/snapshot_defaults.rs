//! Snapshot defaults and registry resolution tests for suite-gate-config.
// crates/suite-gate-config/tests/snapshot_defaults.rs
// =============================================================================
// Module: Snapshot Default Tests
// Description: Validate default merging and registry resolution.
// Purpose: Ensure omitted options resolve the same way every time.
// =============================================================================

use suite_gate_config::SuiteGateConfig;
use suite_gate_core::ConfigLookup;
use suite_gate_core::ConfigValue;
use suite_gate_core::ExtensionSet;

type TestResult = Result<(), String>;

fn parse(content: &str) -> Result<SuiteGateConfig, String> {
    SuiteGateConfig::from_toml_str(content).map_err(|err| err.to_string())
}

#[test]
fn empty_file_gets_default_availability() -> TestResult {
    let config = parse("")?;
    let services = config.service_registry();
    for (tag, expected) in [("compute", true), ("network", false), ("identity", true), ("baremetal", false)] {
        if services.availability(tag) != Ok(expected) {
            return Err(format!("unexpected default availability for {tag}"));
        }
    }
    Ok(())
}

#[test]
fn file_values_override_defaults() -> TestResult {
    let config = parse("[service_available]\nneutron = true\nnova = false\n")?;
    let services = config.service_registry();
    if services.availability("network") != Ok(true) || services.availability("compute") != Ok(false)
    {
        return Err("expected file values to win".to_string());
    }
    Ok(())
}

#[test]
fn extensions_default_to_wildcard() -> TestResult {
    let config = parse("")?;
    let extensions = config.extension_registry();
    for service in ["compute", "identity", "network", "object", "volume"] {
        if extensions.get(service) != Some(&ExtensionSet::All) {
            return Err(format!("expected wildcard default for {service}"));
        }
    }
    Ok(())
}

#[test]
fn configured_extension_list_is_used() -> TestResult {
    let config = parse("[network-feature-enabled]\napi_extensions = [\"router\", \"quotas\"]\n")?;
    let extensions = config.extension_registry();
    if extensions.is_enabled("router", "network") != Ok(true) {
        return Err("expected router to be enabled".to_string());
    }
    if extensions.is_enabled("dvr", "network") != Ok(false) {
        return Err("expected dvr to be disabled".to_string());
    }
    Ok(())
}

#[test]
fn arbitrary_groups_keep_their_values() -> TestResult {
    let config = parse(
        "[compute-feature-enabled]\nresize = true\nmin_ram = 512\n[identity]\nregion = \"RegionOne\"\n\n[empty]\n",
    )?;
    let snapshot = config.snapshot();
    if snapshot.get("compute-feature-enabled", "resize") != Some(&ConfigValue::Bool(true)) {
        return Err("expected resize flag".to_string());
    }
    if snapshot.get("compute-feature-enabled", "min_ram") != Some(&ConfigValue::Integer(512)) {
        return Err("expected integer option".to_string());
    }
    if snapshot.get("identity", "region") != Some(&ConfigValue::from("RegionOne")) {
        return Err("expected string option".to_string());
    }
    if !matches!(snapshot.lookup("empty", "anything"), ConfigLookup::MissingOption) {
        return Err("expected empty group to exist".to_string());
    }
    if !matches!(snapshot.lookup("absent", "anything"), ConfigLookup::MissingGroup) {
        return Err("expected absent group to be missing".to_string());
    }
    Ok(())
}
