//! The per-chain slice of the result tree.

use std::borrow::Cow;

use serde::Serialize;

use crate::foundation::RuleOutcome;

/// Outcomes recorded by one chain on one member, in execution order.
///
/// A chain result exists even when every rule passed (or the chain was
/// empty): the tree records what ran, not just what failed.
#[derive(Debug, Clone, Serialize)]
pub struct ChainResult {
    chain: Cow<'static, str>,
    member: Cow<'static, str>,
    outcomes: Vec<RuleOutcome>,
}

impl ChainResult {
    pub(crate) fn new(chain: Cow<'static, str>, member: Cow<'static, str>) -> Self {
        Self {
            chain,
            member,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, outcome: RuleOutcome) {
        self.outcomes.push(outcome);
    }

    /// The chain's name (`"default"` unless named at registration).
    #[must_use]
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// The member this chain validated.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    /// All recorded outcomes, in the order the rules ran.
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Whether any recorded outcome is a failure.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_success())
    }

    /// Number of failing outcomes in this chain.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// The failing outcomes only, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::check::MessageArgs;

    fn chain_with(outcomes: Vec<RuleOutcome>) -> ChainResult {
        let mut chain = ChainResult::new("default".into(), "Name".into());
        for outcome in outcomes {
            chain.push(outcome);
        }
        chain
    }

    #[test]
    fn empty_chain_has_no_errors() {
        let chain = chain_with(vec![]);
        assert!(!chain.has_errors());
        assert_eq!(chain.error_count(), 0);
        assert!(chain.outcomes().is_empty());
    }

    #[test]
    fn counts_failures_only() {
        let chain = chain_with(vec![
            RuleOutcome::passed("a", "A"),
            RuleOutcome::failed("b", "B", "failed".into(), MessageArgs::new()),
            RuleOutcome::passed("c", "C"),
        ]);
        assert!(chain.has_errors());
        assert_eq!(chain.error_count(), 1);
        assert_eq!(chain.failures().count(), 1);
    }

    #[test]
    fn preserves_execution_order() {
        let chain = chain_with(vec![
            RuleOutcome::passed("first", "First"),
            RuleOutcome::passed("second", "Second"),
        ]);
        let codes: Vec<&str> = chain.outcomes().iter().map(RuleOutcome::code).collect();
        assert_eq!(codes, ["first", "second"]);
    }
}
