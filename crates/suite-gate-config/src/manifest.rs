// crates/suite-gate-config/src/manifest.rs
// ============================================================================
// Module: Suite Manifest
// Description: TOML description of tests and their decorator stacks.
// Purpose: Load decorated test definitions into a catalog.
// Dependencies: suite-gate-core, serde, toml, tracing
// ============================================================================

//! ## Overview
//! A manifest lists tests as `[[test]]` tables. Each test carries an `id`, an
//! optional `doc`, and a `decorators` array written the way decorators are
//! stacked above a function: outermost first. Loading applies them innermost
//! first, so the written order is also the evaluation order.
//!
//! ```toml
//! [[test]]
//! id = "test_create_server"
//! decorators = [
//!   { kind = "services", services = ["compute"] },
//!   { kind = "idempotent_id", id = "453ad4d5-e486-4b2f-be72-cffc8149e586" },
//! ]
//! ```
//!
//! Structural problems (unknown decorator kinds, unexpected arguments) fail
//! the whole manifest. Argument values a decorator rejects put that one test
//! in the catalog as rejected, so it is reported as invalid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use suite_gate_core::AttrType;
use suite_gate_core::CatalogError;
use suite_gate_core::ConfigPredicate;
use suite_gate_core::ConfigValue;
use suite_gate_core::MetadataError;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::StressConfig;
use suite_gate_core::TestBuilder;
use suite_gate_core::TestCatalog;
use suite_gate_core::TestId;
use thiserror::Error;

use crate::config::MAX_CONFIG_FILE_SIZE;
use crate::config::config_value_from_toml;
use crate::config::validate_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of tests in one manifest.
pub const MAX_MANIFEST_TESTS: usize = 10_000;
/// Maximum number of decorators stacked on one test.
pub const MAX_DECORATORS_PER_TEST: usize = 64;
/// Key naming the decorator of a table.
const KIND_KEY: &str = "kind";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// I/O failure while reading the manifest.
    #[error("manifest io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("manifest parse error: {0}")]
    Parse(String),
    /// Structurally invalid manifest.
    #[error("invalid manifest: {0}")]
    Invalid(String),
    /// A decorator table names no known decorator.
    #[error("test {test}: unknown decorator kind {kind}")]
    UnknownDecorator {
        /// Test carrying the decorator.
        test: TestId,
        /// Rejected kind.
        kind: String,
    },
    /// Catalog registration failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// ============================================================================
// SECTION: Decorator Kinds
// ============================================================================

/// Decorators a manifest may stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoratorKind {
    /// `idempotent_id(id)`.
    IdempotentId,
    /// `attr(type=..., **kwargs)`.
    Attr,
    /// `services(*services)`.
    Services,
    /// `requires_ext(extension=..., service=...)`.
    RequiresExt,
    /// `skip_unless_config(group, option[, message])`.
    SkipUnlessConfig,
    /// `skip_if_config(group, option[, message])`.
    SkipIfConfig,
    /// `stresstest(class_setup_per=..., allow_inheritance=...)`.
    Stresstest,
}

impl DecoratorKind {
    /// Parses a decorator name.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "idempotent_id" => Some(Self::IdempotentId),
            "attr" => Some(Self::Attr),
            "services" => Some(Self::Services),
            "requires_ext" => Some(Self::RequiresExt),
            "skip_unless_config" => Some(Self::SkipUnlessConfig),
            "skip_if_config" => Some(Self::SkipIfConfig),
            "stresstest" => Some(Self::Stresstest),
            _ => None,
        }
    }

    /// Returns the decorator name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdempotentId => "idempotent_id",
            Self::Attr => "attr",
            Self::Services => "services",
            Self::RequiresExt => "requires_ext",
            Self::SkipUnlessConfig => "skip_unless_config",
            Self::SkipIfConfig => "skip_if_config",
            Self::Stresstest => "stresstest",
        }
    }

    /// Returns the accepted argument keys; `None` accepts any key.
    const fn arguments(self) -> Option<&'static [&'static str]> {
        match self {
            Self::IdempotentId => Some(&["id"]),
            Self::Attr => None,
            Self::Services => Some(&["services"]),
            Self::RequiresExt => Some(&["extension", "service"]),
            Self::SkipUnlessConfig | Self::SkipIfConfig => Some(&["group", "option", "message"]),
            Self::Stresstest => Some(&["class_setup_per", "allow_inheritance"]),
        }
    }
}

// ============================================================================
// SECTION: Manifest Model
// ============================================================================

/// One test in a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestTest {
    /// Test identifier.
    pub id: TestId,
    /// The test's own documentation.
    #[serde(default)]
    pub doc: Option<String>,
    /// Decorator tables, outermost first.
    #[serde(default)]
    pub decorators: Vec<toml::Table>,
}

/// Parsed suite manifest.
///
/// # Invariants
/// - Every decorator table names a known kind and only its accepted keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteManifest {
    /// Tests in file order.
    #[serde(default, rename = "test")]
    pub tests: Vec<ManifestTest>,
}

impl SuiteManifest {
    /// Loads a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when reading, parsing or validation fails.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        validate_path(path).map_err(|reason| ManifestError::Invalid(format!("manifest {reason}")))?;
        let bytes = fs::read(path).map_err(|err| ManifestError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ManifestError::Invalid("manifest file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ManifestError::Invalid("manifest file must be utf-8".to_string()))?;
        let manifest = Self::from_toml_str(content)?;
        tracing::debug!(path = %path.display(), tests = manifest.tests.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Parses manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self =
            toml::from_str(content).map_err(|err| ManifestError::Parse(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validates limits and decorator structure.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the manifest is structurally invalid.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.tests.len() > MAX_MANIFEST_TESTS {
            return Err(ManifestError::Invalid("too many tests".to_string()));
        }
        for test in &self.tests {
            if test.decorators.len() > MAX_DECORATORS_PER_TEST {
                return Err(ManifestError::Invalid(format!("test {} has too many decorators", test.id)));
            }
            for table in &test.decorators {
                let kind = decorator_kind(&test.id, table)?;
                let Some(accepted) = kind.arguments() else {
                    continue;
                };
                if let Some(key) =
                    table.keys().find(|key| *key != KIND_KEY && !accepted.contains(&key.as_str()))
                {
                    return Err(ManifestError::Invalid(format!(
                        "test {}: {} does not accept argument {key}",
                        test.id,
                        kind.as_str()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Applies every decorator stack and catalogues the results.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for structural problems or duplicate test ids.
    pub fn build_catalog(&self, services: &ServiceCatalog) -> Result<TestCatalog, ManifestError> {
        let mut catalog = TestCatalog::new();
        for test in &self.tests {
            let builder = match &test.doc {
                Some(doc) => TestBuilder::with_doc(test.id.clone(), doc.clone()),
                None => TestBuilder::new(test.id.clone()),
            };
            let mut decorated = Ok(builder);
            for table in test.decorators.iter().rev() {
                let kind = decorator_kind(&test.id, table)?;
                decorated = decorated.and_then(|builder| apply(builder, kind, table, services));
            }
            match decorated {
                Ok(builder) => catalog.register(builder.build())?,
                Err(error) => catalog.register_rejected(test.id.clone(), error)?,
            }
        }
        Ok(catalog)
    }
}

// ============================================================================
// SECTION: Decoration
// ============================================================================

/// Reads the `kind` of a decorator table.
fn decorator_kind(test: &TestId, table: &toml::Table) -> Result<DecoratorKind, ManifestError> {
    let Some(kind) = table.get(KIND_KEY) else {
        return Err(ManifestError::Invalid(format!("test {test}: decorator without kind")));
    };
    let Some(kind) = kind.as_str() else {
        return Err(ManifestError::Invalid(format!("test {test}: decorator kind must be a string")));
    };
    DecoratorKind::parse(kind).ok_or_else(|| ManifestError::UnknownDecorator {
        test: test.clone(),
        kind: kind.to_string(),
    })
}

/// Applies one decorator table to a builder.
fn apply(
    builder: TestBuilder,
    kind: DecoratorKind,
    table: &toml::Table,
    services: &ServiceCatalog,
) -> Result<TestBuilder, MetadataError> {
    let args = Arguments {
        decorator: kind.as_str(),
        table,
    };
    match kind {
        DecoratorKind::IdempotentId => builder.idempotent_id_value(&args.value("id")?),
        DecoratorKind::Attr => {
            let mut builder = builder;
            for (key, value) in table {
                if key == KIND_KEY {
                    continue;
                }
                let value = args.convert(key, value)?;
                builder = if key == "type" {
                    builder.attr(AttrType::from_value(&value)?)
                } else {
                    builder.attr_keyword(key, value)
                };
            }
            Ok(builder)
        }
        DecoratorKind::Services => {
            let declared = args.string_list("services")?;
            builder.services(services, declared)
        }
        DecoratorKind::RequiresExt => {
            let extension = args.string("extension")?;
            let service = args.string("service")?;
            Ok(builder.requires_ext(&extension, &service))
        }
        DecoratorKind::SkipUnlessConfig => Ok(builder.skip_unless_config(args.predicate()?)),
        DecoratorKind::SkipIfConfig => Ok(builder.skip_if_config(args.predicate()?)),
        DecoratorKind::Stresstest => {
            let mut stress = StressConfig::default();
            if let Some(frequency) = args.optional_string("class_setup_per")? {
                stress.class_setup_per = frequency.parse()?;
            }
            if let Some(inherit) = args.optional_bool("allow_inheritance")? {
                stress.allow_inheritance = inherit;
            }
            Ok(builder.stresstest(stress))
        }
    }
}

/// Typed access to a decorator table's arguments.
struct Arguments<'a> {
    /// Decorator name for diagnostics.
    decorator: &'static str,
    /// Raw table.
    table: &'a toml::Table,
}

impl Arguments<'_> {
    /// Builds an argument error.
    fn error(&self, argument: &'static str, reason: impl Into<String>) -> MetadataError {
        MetadataError::InvalidArgument {
            decorator: self.decorator,
            argument,
            reason: reason.into(),
        }
    }

    /// Converts a raw value, rejecting tables.
    fn convert(&self, key: &str, value: &toml::Value) -> Result<ConfigValue, MetadataError> {
        config_value_from_toml(value, 0)
            .map_err(|reason| self.error("kwargs", format!("{key} {reason}")))
    }

    /// Returns a required argument as a dynamic value.
    fn value(&self, argument: &'static str) -> Result<ConfigValue, MetadataError> {
        let raw = self.table.get(argument).ok_or_else(|| self.error(argument, "is required"))?;
        config_value_from_toml(raw, 0).map_err(|reason| self.error(argument, reason))
    }

    /// Returns a required string argument.
    fn string(&self, argument: &'static str) -> Result<String, MetadataError> {
        self.optional_string(argument)?.ok_or_else(|| self.error(argument, "is required"))
    }

    /// Returns an optional string argument.
    fn optional_string(&self, argument: &'static str) -> Result<Option<String>, MetadataError> {
        self.table
            .get(argument)
            .map(|raw| {
                raw.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.error(argument, "must be a string"))
            })
            .transpose()
    }

    /// Returns an optional boolean argument.
    fn optional_bool(&self, argument: &'static str) -> Result<Option<bool>, MetadataError> {
        self.table
            .get(argument)
            .map(|raw| raw.as_bool().ok_or_else(|| self.error(argument, "must be a boolean")))
            .transpose()
    }

    /// Returns a required array of strings.
    fn string_list(&self, argument: &'static str) -> Result<Vec<String>, MetadataError> {
        let value = self.value(argument)?;
        value
            .as_string_list()
            .map(|items| items.into_iter().map(str::to_string).collect())
            .ok_or_else(|| self.error(argument, "must be an array of strings"))
    }

    /// Returns the `(group, option[, message])` predicate.
    fn predicate(&self) -> Result<ConfigPredicate, MetadataError> {
        let predicate = ConfigPredicate::new(self.string("group")?, self.string("option")?);
        Ok(match self.optional_string("message")? {
            Some(message) => predicate.with_message(message),
            None => predicate,
        })
    }
}
