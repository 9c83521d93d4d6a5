// crates/suite-gate-cli/src/render.rs
// ============================================================================
// Module: Report Rendering
// Description: Text and JSON renderings of suite, service, and id reports.
// Purpose: Produce deterministic CLI output from engine reports.
// Dependencies: suite-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every renderer returns a `String` so output stays testable; the binary
//! writes it to stdout in one call. Rows follow the report's own ordering,
//! which is test id or service tag order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use suite_gate_core::IdConflict;
use suite_gate_core::ServiceRegistry;
use suite_gate_core::SuiteReport;
use suite_gate_core::TestCatalog;
use suite_gate_core::TestId;
use suite_gate_core::Verdict;

// ============================================================================
// SECTION: Suite Reports
// ============================================================================

/// Renders one line per test followed by the totals.
#[must_use]
pub fn suite_report_text(report: &SuiteReport) -> String {
    let mut lines: Vec<String> = report
        .entries
        .iter()
        .map(|entry| match &entry.verdict {
            Verdict::Run => format!("{} ... run", entry.test_id),
            Verdict::Skip(reason) | Verdict::Invalid(reason) => {
                format!("{} ... {}: {reason}", entry.test_id, entry.verdict.label())
            }
        })
        .collect();
    let totals = report.totals;
    lines.push(format!(
        "totals: run={} skip={} invalid={}",
        totals.run, totals.skip, totals.invalid
    ));
    lines.join("\n")
}

// ============================================================================
// SECTION: Service Listing
// ============================================================================

/// One catalogued service with its resolved availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRow {
    /// Service tag.
    pub tag: String,
    /// Human-readable group.
    pub group: String,
    /// Resolved availability; `None` when unresolved.
    pub available: Option<bool>,
}

/// Collects service rows in tag order.
#[must_use]
pub fn service_rows(registry: &ServiceRegistry) -> Vec<ServiceRow> {
    registry
        .iter()
        .map(|(tag, status)| ServiceRow {
            tag: tag.to_string(),
            group: status.group.clone(),
            available: status.available,
        })
        .collect()
}

/// Renders services as aligned columns.
#[must_use]
pub fn services_text(rows: &[ServiceRow]) -> String {
    let tag_width = rows.iter().map(|row| row.tag.len()).max().unwrap_or(0);
    let group_width = rows.iter().map(|row| row.group.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let state = match row.available {
            Some(true) => "available",
            Some(false) => "unavailable",
            None => "unresolved",
        };
        lines.push(format!("{:tag_width$}  {:group_width$}  {state}", row.tag, row.group));
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Idempotent Id Audit
// ============================================================================

/// Duplicate and missing idempotent ids across a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdAudit {
    /// Ids claimed by more than one test.
    pub conflicts: Vec<IdConflict>,
    /// Tests without an id.
    pub missing: Vec<TestId>,
}

impl IdAudit {
    /// Audits a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &TestCatalog) -> Self {
        Self {
            conflicts: catalog.idempotent_id_conflicts(),
            missing: catalog.missing_idempotent_ids().into_iter().cloned().collect(),
        }
    }

    /// Returns true when any id is claimed twice.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Renders the audit, one finding per line.
#[must_use]
pub fn id_audit_text(audit: &IdAudit) -> String {
    let mut lines = Vec::new();
    for conflict in &audit.conflicts {
        let tests: Vec<&str> = conflict.tests.iter().map(TestId::as_str).collect();
        lines.push(format!("duplicate idempotent id {}: {}", conflict.uuid, tests.join(", ")));
    }
    for test in &audit.missing {
        lines.push(format!("missing idempotent id: {test}"));
    }
    lines.push(format!(
        "duplicates={} missing={}",
        audit.conflicts.len(),
        audit.missing.len()
    ));
    lines.join("\n")
}

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Renders any report as pretty JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
