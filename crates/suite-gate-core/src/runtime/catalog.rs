// crates/suite-gate-core/src/runtime/catalog.rs
// ============================================================================
// Module: Test Catalog
// Description: Side-table mapping test identity to frozen definitions.
// Purpose: Register, select, audit, and evaluate a whole suite.
// Dependencies: crate::core, crate::runtime::{builder, composer}, serde, thiserror
// ============================================================================

//! ## Overview
//! The catalog replaces attributes injected onto test callables with an
//! explicit map keyed by [`TestId`]. Tests whose decorators failed are kept
//! as rejected entries so a suite evaluation reports them as `Invalid`
//! instead of silently dropping them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::core::MetadataError;
use crate::core::TestId;
use crate::core::Verdict;
use crate::runtime::builder::TestDefinition;
use crate::runtime::composer::DecisionComposer;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A test with this identifier is already registered.
    #[error("duplicate test id: {0}")]
    DuplicateTest(TestId),
}

// ============================================================================
// SECTION: Entries
// ============================================================================

/// A catalogued test.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    /// Decorators applied cleanly.
    Defined(TestDefinition),
    /// A decorator rejected its arguments.
    Rejected {
        /// Test identifier.
        test_id: TestId,
        /// Decoration failure.
        error: MetadataError,
    },
}

impl CatalogEntry {
    /// Returns the test identifier.
    #[must_use]
    pub const fn test_id(&self) -> &TestId {
        match self {
            Self::Defined(definition) => definition.test_id(),
            Self::Rejected {
                test_id,
                ..
            } => test_id,
        }
    }

    /// Returns the definition when decoration succeeded.
    #[must_use]
    pub const fn definition(&self) -> Option<&TestDefinition> {
        match self {
            Self::Defined(definition) => Some(definition),
            Self::Rejected {
                ..
            } => None,
        }
    }
}

// ============================================================================
// SECTION: Tag Filter
// ============================================================================

/// Selects tests by attribute tags.
///
/// # Invariants
/// - An empty filter matches every test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Tags a test must carry.
    required: BTreeSet<String>,
    /// Tags a test must not carry.
    excluded: BTreeSet<String>,
}

impl TagFilter {
    /// Creates a filter matching every test.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            required: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Requires `tag`.
    #[must_use]
    pub fn require(mut self, tag: impl Into<String>) -> Self {
        self.required.insert(tag.into());
        self
    }

    /// Excludes `tag`.
    #[must_use]
    pub fn exclude(mut self, tag: impl Into<String>) -> Self {
        self.excluded.insert(tag.into());
        self
    }

    /// Returns whether `tags` satisfies the filter.
    #[must_use]
    pub fn matches(&self, tags: &BTreeSet<String>) -> bool {
        self.required.is_subset(tags) && self.excluded.is_disjoint(tags)
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Verdict for one catalogued test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteEntry {
    /// Test identifier.
    pub test_id: TestId,
    /// Idempotent id as declared, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotent_id: Option<String>,
    /// Attribute tags.
    pub tags: Vec<String>,
    /// Pre-execution verdict.
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Verdict counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictTotals {
    /// Tests that will run.
    pub run: usize,
    /// Tests skipped.
    pub skip: usize,
    /// Tests rejected as malformed.
    pub invalid: usize,
}

impl VerdictTotals {
    /// Counts one verdict.
    const fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Run => self.run += 1,
            Verdict::Skip(_) => self.skip += 1,
            Verdict::Invalid(_) => self.invalid += 1,
        }
    }
}

/// Verdicts for a suite, in test id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Per-test entries.
    pub entries: Vec<SuiteEntry>,
    /// Totals by verdict.
    pub totals: VerdictTotals,
}

impl SuiteReport {
    /// Returns true when any test is invalid.
    #[must_use]
    pub const fn has_invalid(&self) -> bool {
        self.totals.invalid > 0
    }
}

/// Tests claiming the same idempotent id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdConflict {
    /// Canonical hyphenated UUID.
    pub uuid: String,
    /// Tests sharing it, in test id order.
    pub tests: Vec<TestId>,
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Side-table of every test in a suite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCatalog {
    /// Entries keyed by test id.
    entries: BTreeMap<TestId, CatalogEntry>,
}

impl TestCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers a frozen definition.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTest`] when the id is already present.
    pub fn register(&mut self, definition: TestDefinition) -> Result<(), CatalogError> {
        let test_id = definition.test_id().clone();
        self.insert(test_id, CatalogEntry::Defined(definition))
    }

    /// Registers a test whose decoration failed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTest`] when the id is already present.
    pub fn register_rejected(
        &mut self,
        test_id: TestId,
        error: MetadataError,
    ) -> Result<(), CatalogError> {
        tracing::warn!(test = %test_id, %error, "test definition rejected");
        self.insert(
            test_id.clone(),
            CatalogEntry::Rejected {
                test_id,
                error,
            },
        )
    }

    /// Inserts an entry, refusing duplicates.
    fn insert(&mut self, test_id: TestId, entry: CatalogEntry) -> Result<(), CatalogError> {
        if self.entries.contains_key(&test_id) {
            return Err(CatalogError::DuplicateTest(test_id));
        }
        self.entries.insert(test_id, entry);
        Ok(())
    }

    /// Returns the entry for `test_id`.
    #[must_use]
    pub fn get(&self, test_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(&TestId::new(test_id))
    }

    /// Iterates entries in test id order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Returns the number of tests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the definitions matching `filter`.
    #[must_use]
    pub fn select(&self, filter: &TagFilter) -> Vec<&TestDefinition> {
        self.entries
            .values()
            .filter_map(CatalogEntry::definition)
            .filter(|definition| filter.matches(definition.metadata().tags()))
            .collect()
    }

    /// Returns every idempotent id claimed by more than one test.
    #[must_use]
    pub fn idempotent_id_conflicts(&self) -> Vec<IdConflict> {
        let mut claims: BTreeMap<String, Vec<TestId>> = BTreeMap::new();
        for definition in self.entries.values().filter_map(CatalogEntry::definition) {
            if let Some(id) = definition.metadata().idempotent_id() {
                claims.entry(id.canonical()).or_default().push(definition.test_id().clone());
            }
        }
        claims
            .into_iter()
            .filter(|(_, tests)| tests.len() > 1)
            .map(|(uuid, tests)| IdConflict {
                uuid,
                tests,
            })
            .collect()
    }

    /// Returns the tests without an idempotent id.
    #[must_use]
    pub fn missing_idempotent_ids(&self) -> Vec<&TestId> {
        self.entries
            .values()
            .filter_map(CatalogEntry::definition)
            .filter(|definition| definition.metadata().idempotent_id().is_none())
            .map(TestDefinition::test_id)
            .collect()
    }

    /// Evaluates every test selected by `filter`.
    ///
    /// Rejected tests carry no tags and are always reported, whatever the
    /// filter, so malformed definitions cannot be filtered out of sight.
    #[must_use]
    pub fn evaluate(&self, composer: &DecisionComposer<'_>, filter: &TagFilter) -> SuiteReport {
        let mut report = SuiteReport::default();
        for entry in self.entries.values() {
            let suite_entry = match entry {
                CatalogEntry::Defined(definition) => {
                    let metadata = definition.metadata();
                    if !filter.matches(metadata.tags()) {
                        continue;
                    }
                    SuiteEntry {
                        test_id: definition.test_id().clone(),
                        idempotent_id: metadata.idempotent_id().map(ToString::to_string),
                        tags: metadata.tags().iter().cloned().collect(),
                        verdict: composer.evaluate(definition),
                    }
                }
                CatalogEntry::Rejected {
                    test_id,
                    error,
                } => SuiteEntry {
                    test_id: test_id.clone(),
                    idempotent_id: None,
                    tags: Vec::new(),
                    verdict: Verdict::invalid(error.to_string()),
                },
            };
            report.totals.record(&suite_entry.verdict);
            report.entries.push(suite_entry);
        }
        report
    }
}
