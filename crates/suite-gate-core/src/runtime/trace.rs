// crates/suite-gate-core/src/runtime/trace.rs
// ============================================================================
// Module: Decision Trace Hooks
// Description: Observe every gate outcome during evaluation.
// Purpose: Let callers capture gate-level outcomes without coupling to a sink.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The composer calls [`DecisionTrace::on_gate_evaluated`] for each gate it
//! actually checks. Gates skipped by short-circuiting are never reported.

use serde::Serialize;

use crate::core::GateKind;
use crate::core::GateSpec;
use crate::core::TestId;
use crate::core::Verdict;

/// Trace hook for gate evaluation.
pub trait DecisionTrace {
    /// Called after a gate has been checked.
    fn on_gate_evaluated(&mut self, test_id: &TestId, gate: &GateSpec, verdict: &Verdict);
}

/// No-op trace hook for fast paths.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default)]
pub struct NoopTrace;

impl DecisionTrace for NoopTrace {
    fn on_gate_evaluated(&mut self, _test_id: &TestId, _gate: &GateSpec, _verdict: &Verdict) {}
}

/// One recorded gate outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateTraceEntry {
    /// Test the gate belongs to.
    pub test_id: TestId,
    /// Gate kind.
    pub gate: GateKind,
    /// Gate outcome.
    pub verdict: Verdict,
}

/// Trace hook that keeps every outcome in evaluation order.
#[derive(Debug, Default)]
pub struct RecordingTrace {
    /// Recorded entries.
    entries: Vec<GateTraceEntry>,
}

impl RecordingTrace {
    /// Returns the recorded entries.
    #[must_use]
    pub fn entries(&self) -> &[GateTraceEntry] {
        &self.entries
    }

    /// Consumes the trace, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<GateTraceEntry> {
        self.entries
    }
}

impl DecisionTrace for RecordingTrace {
    fn on_gate_evaluated(&mut self, test_id: &TestId, gate: &GateSpec, verdict: &Verdict) {
        self.entries.push(GateTraceEntry {
            test_id: test_id.clone(),
            gate: gate.kind(),
            verdict: verdict.clone(),
        });
    }
}
