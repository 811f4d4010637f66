//! The rule registry.

use std::fmt;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::RegistryError;
use crate::rule::Rule;
use crate::rules;
use crate::telemetry::REGISTRY_TARGET;

static BUILTIN: OnceCell<RuleRegistry> = OnceCell::new();

/// An immutable, ordered set of rules.
///
/// Registration order is significant: the engine reports results rule by
/// rule in this order.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder { rules: Vec::new() }
    }

    /// Returns the process-wide registry of built-in rules, registering
    /// them on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] if two built-in rules share
    /// an id.
    pub fn builtin() -> Result<&'static Self, RegistryError> {
        BUILTIN.get_or_try_init(|| {
            rules::register_builtin(Self::builder()).map(RuleRegistryBuilder::build)
        })
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &(dyn Rule + 'static)> + '_ {
        self.rules.iter().map(|rule| &**rule)
    }

    /// Returns the rule with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules().find(|rule| rule.descriptor().id() == id)
    }

    /// Returns the registration index of the rule with `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules().position(|rule| rule.descriptor().id() == id)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules().map(|rule| rule.descriptor().id()))
            .finish()
    }
}

/// Collects rules for a [`RuleRegistry`].
pub struct RuleRegistryBuilder {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistryBuilder {
    /// Appends a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] when a rule with the same id
    /// is already registered.
    pub fn register(mut self, rule: impl Rule + 'static) -> Result<Self, RegistryError> {
        let id = rule.descriptor().id();
        if self.rules.iter().any(|existing| existing.descriptor().id() == id) {
            return Err(RegistryError::DuplicateRule { id: id.to_owned() });
        }
        debug!(
            target: REGISTRY_TARGET,
            rule = id,
            index = self.rules.len(),
            "registered rule"
        );
        self.rules.push(Box::new(rule));
        Ok(self)
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> RuleRegistry {
        debug!(
            target: REGISTRY_TARGET,
            rules = self.rules.len(),
            "rule registry built"
        );
        RuleRegistry { rules: self.rules }
    }
}

impl fmt::Debug for RuleRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistryBuilder")
            .field("rules", &self.rules.len())
            .finish()
    }
}
