//! String rules. All operate on `str`, so they bind to `String`, `&str`,
//! and anything else the accessor can deref to a string slice.
//!
//! Lengths count characters, not bytes.

use regex::Regex;

use crate::foundation::{Rule, RuleCheck};
use crate::rule;

rule! {
    /// Fails on the empty string.
    pub NotEmpty("empty") for str;
    check(value) { !value.is_empty() }
    fail(member, _value) {
        RuleCheck::fail("The field {0} must not be empty.").with_arg(member)
    }
    fn not_empty();
}

rule! {
    /// Fails when the string is shorter than the minimum.
    pub MinLength("min_length") { min: usize } for str;
    check(self, value) { value.chars().count() >= self.min }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must be at least {1} characters long.")
            .with_arg(member)
            .with_arg(self.min)
    }
    fn min_length(min: usize);
}

rule! {
    /// Fails when the string is longer than the maximum.
    pub MaxLength("max_length") { max: usize } for str;
    check(self, value) { value.chars().count() <= self.max }
    fail(self, member, _value) {
        RuleCheck::fail("The field {0} must be at most {1} characters long.")
            .with_arg(member)
            .with_arg(self.max)
    }
    fn max_length(max: usize);
}

/// Fails unless the string matches a regular expression.
///
/// The pattern is compiled once at construction; an invalid pattern is a
/// registration-time error, not a per-value one.
pub struct Matches {
    pattern: Regex,
}

impl Matches {
    /// Compiles the pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Rule for Matches {
    type Input = str;

    fn code(&self) -> &'static str {
        "pattern_mismatch"
    }

    fn check(&self, member: &str, value: &str) -> RuleCheck {
        RuleCheck::from_condition(self.pattern.is_match(value), || {
            RuleCheck::fail("The field {0} must match the pattern {1}.")
                .with_arg(member)
                .with_arg(self.pattern.as_str())
        })
    }
}

/// Creates a [`Matches`] rule from a pattern.
///
/// # Errors
///
/// Returns the regex compilation error for an invalid pattern.
pub fn matches(pattern: &str) -> Result<Matches, regex::Error> {
    Matches::new(pattern)
}
