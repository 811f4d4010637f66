//! Engine configuration: rule overrides and traversal limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Category, Severity};

/// Default bound on the number of ancestors a query visits.
pub const DEFAULT_MAX_QUERY_DEPTH: usize = 256;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    #[error("invalid engine configuration: {source}")]
    Json {
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The depth bound was zero.
    #[error("max_query_depth must be at least 1")]
    ZeroQueryDepth,
}

/// Per-rule or per-category override.
///
/// Unset fields fall through to the next, less specific, layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOverride {
    enabled: Option<bool>,
    severity: Option<Severity>,
}

impl RuleOverride {
    /// An override that disables the rule.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: Some(false),
            severity: None,
        }
    }

    /// An override that re-grades the rule.
    #[must_use]
    pub const fn with_severity(severity: Severity) -> Self {
        Self {
            enabled: None,
            severity: Some(severity),
        }
    }

    /// Returns the `enabled` setting, if any.
    #[must_use]
    pub const fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// Returns the severity setting, if any.
    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        self.severity
    }
}

/// Engine configuration.
///
/// Overrides are resolved most specific first: a rule id entry wins over a
/// category entry, which wins over the rule's own defaults.
///
/// # Example
///
/// ```
/// use mender_core::{Category, EngineConfig, Severity};
///
/// let config = EngineConfig::from_json(
///     r#"{ "rules": { "redundant-true-loop-condition": { "severity": "error" } },
///          "categories": { "code_quality": { "enabled": false } } }"#,
/// )?;
/// assert!(!config.is_enabled("optional-parameter-mismatch", Category::CodeQuality));
/// assert_eq!(
///     config.severity_for(
///         "redundant-true-loop-condition",
///         Category::RedundanciesInCode,
///         Severity::Warning,
///     ),
///     Severity::Error,
/// );
/// # Ok::<(), mender_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    rules: BTreeMap<String, RuleOverride>,
    categories: BTreeMap<Category, RuleOverride>,
    max_query_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            categories: BTreeMap::new(),
            max_query_depth: DEFAULT_MAX_QUERY_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and
    /// [`ConfigError::ZeroQueryDepth`] when `max_query_depth` is zero.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|source| ConfigError::Json { source })?;
        if config.max_query_depth == 0 {
            return Err(ConfigError::ZeroQueryDepth);
        }
        Ok(config)
    }

    /// Adds or replaces the override for a rule id.
    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>, rule: RuleOverride) -> Self {
        self.rules.insert(rule_id.into(), rule);
        self
    }

    /// Adds or replaces the override for a category.
    #[must_use]
    pub fn with_category(mut self, category: Category, rule: RuleOverride) -> Self {
        self.categories.insert(category, rule);
        self
    }

    /// Sets the ancestor bound for queries. Zero is raised to one.
    #[must_use]
    pub fn with_max_query_depth(mut self, depth: usize) -> Self {
        self.max_query_depth = depth.max(1);
        self
    }

    /// Returns the ancestor bound for queries.
    #[must_use]
    pub const fn max_query_depth(&self) -> usize {
        self.max_query_depth
    }

    /// Returns whether the rule takes part in queries and scans.
    #[must_use]
    pub fn is_enabled(&self, rule_id: &str, category: Category) -> bool {
        self.lookup(rule_id, category, RuleOverride::enabled)
            .unwrap_or(true)
    }

    /// Returns the configured severity, or `default` when none is set.
    #[must_use]
    pub fn severity_for(&self, rule_id: &str, category: Category, default: Severity) -> Severity {
        self.lookup(rule_id, category, RuleOverride::severity)
            .unwrap_or(default)
    }

    fn lookup<T>(
        &self,
        rule_id: &str,
        category: Category,
        field: impl Fn(&RuleOverride) -> Option<T>,
    ) -> Option<T> {
        self.rules
            .get(rule_id)
            .and_then(&field)
            .or_else(|| self.categories.get(&category).and_then(&field))
    }
}
