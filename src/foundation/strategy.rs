//! Execution strategies: per-rule policies for chain flow control.
//!
//! A strategy is attached to each rule instance at registration time and is
//! consulted by the chain evaluator AFTER that rule runs. The decision
//! belongs to the rule just executed, never to the next one, and a chain
//! never backtracks.

use crate::foundation::outcome::RuleOutcome;

/// How a rule's result steers the rest of its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionStrategy {
    /// Record the outcome; a failure stops the chain, a success continues.
    ///
    /// This is the default, matching the common "don't pile errors onto a
    /// value that already failed a prerequisite" usage.
    #[default]
    ValidateAndStop,
    /// Record the outcome (success or failure) and always continue.
    ValidateAndContinue,
    /// Optional-member semantics: if the wrapped rule passed, record the
    /// success and continue; if it failed, record a FORCED SUCCESS outcome
    /// and stop the chain. An absent optional value therefore yields exactly
    /// one successful outcome and skips the rest of the chain, while a
    /// present value still runs the remaining rules.
    SkipErrorAndStop,
}

/// The chain evaluator's next move after a rule has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFlow {
    /// Advance to the next rule in the chain.
    Continue,
    /// Terminal: no further rules in this chain run.
    Stop,
}

impl ExecutionStrategy {
    /// Applies this strategy to the outcome of the rule that just ran,
    /// returning the outcome to record and the flow decision.
    #[must_use]
    pub fn apply(self, outcome: RuleOutcome) -> (RuleOutcome, ChainFlow) {
        match (self, outcome.is_success()) {
            (Self::ValidateAndContinue, _) => (outcome, ChainFlow::Continue),
            (Self::ValidateAndStop, true) => (outcome, ChainFlow::Continue),
            (Self::ValidateAndStop, false) => (outcome, ChainFlow::Stop),
            (Self::SkipErrorAndStop, true) => (outcome, ChainFlow::Continue),
            (Self::SkipErrorAndStop, false) => {
                (outcome.into_forced_success(), ChainFlow::Stop)
            }
        }
    }
}
