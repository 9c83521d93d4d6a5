// crates/suite-gate-core/src/runtime/composer.rs
// ============================================================================
// Module: Decision Composer
// Description: Evaluates a definition's gate stack into a single verdict.
// Purpose: Compose stacked gates with short-circuit semantics before execution.
// Dependencies: crate::core, crate::runtime::{builder, trace}, tracing
// ============================================================================

//! ## Overview
//! Gates are checked outermost first (the reverse of application order). The
//! first gate that does not return `Run` decides the verdict and nothing
//! inside it is checked. When every gate passes the verdict is `Run` and
//! [`DecisionComposer::invoke`] runs the body, handing back its result
//! untouched.
//!
//! Evaluation only reads the borrowed registries, so the same definition
//! under the same configuration always yields the same verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ConfigLookup;
use crate::core::ConfigPredicate;
use crate::core::ConfigSnapshot;
use crate::core::ExtensionRegistry;
use crate::core::GateSpec;
use crate::core::ServiceLookupError;
use crate::core::ServiceRegistry;
use crate::core::ServiceTag;
use crate::core::Verdict;
use crate::runtime::builder::TestDefinition;
use crate::runtime::trace::DecisionTrace;
use crate::runtime::trace::NoopTrace;

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// Outcome of running a test through its gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation<T, E> {
    /// Every gate passed; the body ran and produced this result.
    Completed(Result<T, E>),
    /// A gate skipped the test; the body never ran.
    Skipped(String),
    /// A gate rejected the test as malformed; the body never ran.
    Rejected(String),
}

// ============================================================================
// SECTION: Composer
// ============================================================================

/// Evaluates gate stacks against immutable registries.
#[derive(Debug, Clone, Copy)]
pub struct DecisionComposer<'a> {
    /// Service availability.
    services: &'a ServiceRegistry,
    /// Enabled extensions.
    extensions: &'a ExtensionRegistry,
    /// Configuration snapshot for predicate gates.
    config: &'a ConfigSnapshot,
}

impl<'a> DecisionComposer<'a> {
    /// Creates a composer over the given registries.
    #[must_use]
    pub const fn new(
        services: &'a ServiceRegistry,
        extensions: &'a ExtensionRegistry,
        config: &'a ConfigSnapshot,
    ) -> Self {
        Self {
            services,
            extensions,
            config,
        }
    }

    /// Evaluates a definition into a verdict.
    #[must_use]
    pub fn evaluate(&self, definition: &TestDefinition) -> Verdict {
        self.evaluate_with_trace(definition, &mut NoopTrace)
    }

    /// Evaluates a definition, reporting each checked gate to `trace`.
    pub fn evaluate_with_trace<T>(&self, definition: &TestDefinition, trace: &mut T) -> Verdict
    where
        T: DecisionTrace,
    {
        let test_id = definition.test_id();
        for gate in definition.gates_in_evaluation_order() {
            let verdict = self.evaluate_gate(gate);
            trace.on_gate_evaluated(test_id, gate, &verdict);
            match &verdict {
                Verdict::Run => {
                    tracing::debug!(test = %test_id, gate = gate.kind().as_str(), "gate passed");
                }
                Verdict::Skip(reason) => {
                    tracing::info!(test = %test_id, gate = gate.kind().as_str(), %reason, "test skipped");
                    return verdict;
                }
                Verdict::Invalid(reason) => {
                    tracing::warn!(test = %test_id, gate = gate.kind().as_str(), %reason, "test invalid");
                    return verdict;
                }
            }
        }
        Verdict::Run
    }

    /// Runs `body` only when every gate passes.
    pub fn invoke<T, E, F>(&self, definition: &TestDefinition, body: F) -> Invocation<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match self.evaluate(definition) {
            Verdict::Run => Invocation::Completed(body()),
            Verdict::Skip(reason) => Invocation::Skipped(reason),
            Verdict::Invalid(reason) => Invocation::Rejected(reason),
        }
    }

    /// Evaluates a single gate.
    #[must_use]
    pub fn evaluate_gate(&self, gate: &GateSpec) -> Verdict {
        match gate {
            GateSpec::Services {
                services,
            } => self.check_services(services),
            GateSpec::RequiresExt {
                extension,
                service,
            } => self.check_extension(extension, service),
            GateSpec::SkipUnlessConfig(predicate) => self.check_skip_unless(predicate),
            GateSpec::SkipIfConfig(predicate) => self.check_skip_if(predicate),
        }
    }

    /// All declared services must be available, checked in declaration order.
    fn check_services(&self, services: &[ServiceTag]) -> Verdict {
        for service in services {
            match self.services.availability(service.as_str()) {
                Ok(true) => {}
                Ok(false) => {
                    return Verdict::skip(format!(
                        "Skipped because the {service} service is not available"
                    ));
                }
                Err(ServiceLookupError::NotRegistered) => {
                    return Verdict::invalid(format!("{service} is not a registered service"));
                }
                Err(ServiceLookupError::Unresolved) => {
                    return Verdict::invalid(format!(
                        "{service} is a valid service tag but has no availability entry"
                    ));
                }
            }
        }
        Verdict::Run
    }

    /// The extension must be enabled, or the service must enable everything.
    fn check_extension(&self, extension: &str, service: &str) -> Verdict {
        match self.extensions.is_enabled(extension, service) {
            Ok(true) => Verdict::Run,
            Ok(false) => Verdict::skip(format!(
                "Skipped because {service} extension: {extension} is not enabled"
            )),
            Err(_) => Verdict::invalid(format!("{service} does not report api extensions")),
        }
    }

    /// Missing group or option skips, as does a false value.
    fn check_skip_unless(&self, predicate: &ConfigPredicate) -> Verdict {
        let ConfigPredicate {
            group,
            option,
            message,
        } = predicate;
        match self.config.lookup(group, option) {
            ConfigLookup::MissingGroup => {
                Verdict::skip(format!("Config group {group} doesn't exist"))
            }
            ConfigLookup::MissingOption => {
                Verdict::skip(format!("Config option {group}.{option} doesn't exist"))
            }
            ConfigLookup::Value(value) if value.is_truthy() => Verdict::Run,
            ConfigLookup::Value(_) => Verdict::skip(
                message.clone().unwrap_or_else(|| format!("Config option {group}.{option} is false")),
            ),
        }
    }

    /// Only a present, true value skips.
    fn check_skip_if(&self, predicate: &ConfigPredicate) -> Verdict {
        let ConfigPredicate {
            group,
            option,
            message,
        } = predicate;
        match self.config.lookup(group, option) {
            ConfigLookup::Value(value) if value.is_truthy() => Verdict::skip(
                message.clone().unwrap_or_else(|| format!("Config option {group}.{option} is true")),
            ),
            ConfigLookup::MissingGroup | ConfigLookup::MissingOption | ConfigLookup::Value(_) => {
                Verdict::Run
            }
        }
    }
}
