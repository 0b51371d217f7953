//! The per-member slice of the result tree.

use std::borrow::Cow;

use serde::Serialize;

use crate::result::chain::ChainResult;
use crate::result::validation::ValidationResult;

/// Sub-results recorded for a member whose type has its own schema.
#[derive(Debug, Clone, Default, Serialize)]
pub enum NestedResults {
    /// The member is scalar, or its nested value was absent.
    #[default]
    None,
    /// One nested object validated in place.
    Single(ValidationResult),
    /// A collection of nested objects. Each entry keeps the element's
    /// original index so skipped absent elements don't shift the paths of
    /// the ones that ran.
    Collection(Vec<(usize, ValidationResult)>),
}

impl NestedResults {
    /// Whether any nested result, at any depth, contains a failure.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match self {
            Self::None => false,
            Self::Single(result) => result.has_errors(),
            Self::Collection(results) => results.iter().any(|(_, r)| r.has_errors()),
        }
    }

    pub(crate) fn errors_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(result) => result.errors_count(),
            Self::Collection(results) => results.iter().map(|(_, r)| r.errors_count()).sum(),
        }
    }
}

/// Everything recorded for one member: its chains plus any nested tree.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResult {
    member: Cow<'static, str>,
    chains: Vec<ChainResult>,
    nested: NestedResults,
}

impl PropertyResult {
    pub(crate) fn new(member: Cow<'static, str>) -> Self {
        Self {
            member,
            chains: Vec::new(),
            nested: NestedResults::None,
        }
    }

    pub(crate) fn push_chain(&mut self, chain: ChainResult) {
        self.chains.push(chain);
    }

    pub(crate) fn set_nested(&mut self, nested: NestedResults) {
        self.nested = nested;
    }

    /// The member name this result belongs to.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    /// All chain results for this member, in registration order.
    #[must_use]
    pub fn chains(&self) -> &[ChainResult] {
        &self.chains
    }

    /// A named chain's result, if the schema registered one by that name.
    #[must_use]
    pub fn chain(&self, name: &str) -> Option<&ChainResult> {
        self.chains.iter().find(|c| c.chain() == name)
    }

    /// Nested results for a member with its own schema.
    #[must_use]
    pub fn nested(&self) -> &NestedResults {
        &self.nested
    }

    /// Whether this member or anything nested under it recorded a failure.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.chains.iter().any(ChainResult::has_errors) || self.nested.has_errors()
    }

    /// Whether the named chain recorded a failure on this member directly.
    #[must_use]
    pub fn has_errors_in(&self, chain: &str) -> bool {
        self.chain(chain).is_some_and(ChainResult::has_errors)
    }

    /// Total failures on this member, including everything nested.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.chains.iter().map(ChainResult::error_count).sum::<usize>()
            + self.nested.errors_count()
    }
}
