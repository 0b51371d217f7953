//! Ordering and range rules for any `PartialOrd + Display` type.

use std::fmt::Display;

use crate::foundation::{Rule, RuleCheck};
use crate::rule;

/// Fails when the value falls outside an inclusive range.
///
/// A range whose `min` exceeds its `max` can never pass; the rule reports
/// itself misconfigured instead of failing every value.
pub struct InRange<T> {
    min: T,
    max: T,
}

impl<T> InRange<T> {
    #[must_use]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// The inclusive lower bound.
    pub fn min(&self) -> &T {
        &self.min
    }

    /// The inclusive upper bound.
    pub fn max(&self) -> &T {
        &self.max
    }
}

impl<T> Rule for InRange<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    type Input = T;

    fn code(&self) -> &'static str {
        "out_of_range"
    }

    fn check(&self, member: &str, value: &T) -> RuleCheck {
        if self.min > self.max {
            return RuleCheck::misconfigured("range lower bound exceeds upper bound");
        }
        RuleCheck::from_condition(*value >= self.min && *value <= self.max, || {
            RuleCheck::fail("The field {0} must be within {1} and {2}.")
                .with_arg(member)
                .with_arg(&self.min)
                .with_arg(&self.max)
        })
    }
}

rule! {
    /// Fails unless the value is strictly greater than the bound.
    pub GreaterThan<T: PartialOrd + Display>("too_small") { bound: T } for T;
    check(self, value) { *value > self.bound }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must be greater than {1}.")
            .with_arg(member)
            .with_arg(&self.bound)
    }
    fn greater_than(bound: T);
}

rule! {
    /// Fails unless the value is strictly less than the bound.
    pub LessThan<T: PartialOrd + Display>("too_large") { bound: T } for T;
    check(self, value) { *value < self.bound }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must be less than {1}.")
            .with_arg(member)
            .with_arg(&self.bound)
    }
    fn less_than(bound: T);
}

/// Creates an [`InRange`] rule with inclusive bounds.
#[must_use]
pub fn in_range<T>(min: T, max: T) -> InRange<T> {
    InRange::new(min, max)
}
