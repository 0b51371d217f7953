//! Presence and equality rules.

use std::borrow::Borrow;
use std::fmt::Display;
use std::marker::PhantomData;

use crate::foundation::{Rule, RuleCheck};
use crate::rule;

rule! {
    /// Fails when an optional value is absent.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// c.rule(required::<String>())
    /// ```
    pub Required<T>("not_null") for Option<T>;
    check(value) { value.is_some() }
    fail(member, _value) {
        RuleCheck::fail("The field {0} cannot be null.").with_arg(member)
    }
    fn required();
}

impl<T> Required<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Required<T> {
    fn default() -> Self {
        Self::new()
    }
}

rule! {
    /// Fails when an optional value is absent, like [`Required`], but meant to
    /// be registered with [`ExecutionStrategy::SkipErrorAndStop`]: the failure
    /// is then rewritten as a single successful outcome that ends the chain, so
    /// an absent value skips the remaining rules without reporting an error.
    ///
    /// [`ChainBuilder::optional`](crate::schema::ChainBuilder::optional)
    /// registers this rule with that strategy.
    ///
    /// [`ExecutionStrategy::SkipErrorAndStop`]: crate::foundation::ExecutionStrategy::SkipErrorAndStop
    pub Optional<T>("optional") for Option<T>;
    check(value) { value.is_some() }
    fail(member, _value) {
        RuleCheck::fail("The field {0} is not present.").with_arg(member)
    }
}

impl<T> Optional<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

rule! {
    /// Fails unless the value equals the expected one.
    pub EqualTo<T: PartialEq + Display>("not_equal") { expected: T } for T;
    check(self, value) { *value == self.expected }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must be equal to {1}.")
            .with_arg(member)
            .with_arg(&self.expected)
    }
    fn equal_to(expected: T);
}

rule! {
    /// Fails when the value equals the forbidden one.
    pub NotEqualTo<T: PartialEq + Display>("equal") { forbidden: T } for T;
    check(self, value) { *value != self.forbidden }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must not be equal to {1}.")
            .with_arg(member)
            .with_arg(&self.forbidden)
    }
    fn not_equal_to(forbidden: T);
}

/// Adapts a rule over `M` to run on `Option<M>`, passing when absent.
///
/// Useful for applying a single rule to an optional member without
/// restructuring its chain around
/// [`ChainBuilder::optional`](crate::schema::ChainBuilder::optional).
pub struct WhenPresent<M, R> {
    rule: R,
    _marker: PhantomData<fn() -> M>,
}

impl<M, R> WhenPresent<M, R> {
    #[must_use]
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            _marker: PhantomData,
        }
    }
}

impl<M, R> Rule for WhenPresent<M, R>
where
    M: Borrow<R::Input> + Send + Sync + 'static,
    R: Rule,
{
    type Input = Option<M>;

    fn code(&self) -> &'static str {
        self.rule.code()
    }

    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn check(&self, member: &str, value: &Option<M>) -> RuleCheck {
        match value {
            Some(value) => self.rule.check(member, value.borrow()),
            None => RuleCheck::pass(),
        }
    }
}

/// Creates a [`WhenPresent`] adapter around a rule.
#[must_use]
pub fn when_present<M, R>(rule: R) -> WhenPresent<M, R> {
    WhenPresent::new(rule)
}
