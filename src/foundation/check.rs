//! The raw verdict a rule returns before the chain records it.
//!
//! A [`RuleCheck`] carries the unformatted message template together with its
//! arguments. All string fields use `Cow<'static, str>` for zero-allocation
//! in the common case of static templates.

use std::borrow::Cow;
use std::fmt::Display;

use smallvec::SmallVec;

/// Ordered message arguments for a failure template.
///
/// Most rules render one or two values (the member name plus a bound), so
/// two inline slots cover the common case without a heap allocation.
pub type MessageArgs = SmallVec<[Cow<'static, str>; 2]>;

/// The verdict of a single rule invocation.
///
/// A rule either passes, fails with a message template and its arguments, or
/// aborts the whole validation call: [`RuleCheck::Misconfigured`] when the
/// rule lacks required setup (never silently treated as pass or fail), and
/// [`RuleCheck::Fatal`] when evaluation itself blew up.
///
/// # Examples
///
/// ```rust,ignore
/// use rulechain::foundation::RuleCheck;
///
/// fn check(member: &str, value: &str) -> RuleCheck {
///     if value.is_empty() {
///         RuleCheck::fail("The field {0} must not be empty.").with_arg(member)
///     } else {
///         RuleCheck::pass()
///     }
/// }
/// ```
#[derive(Debug)]
pub enum RuleCheck {
    /// The value satisfied the rule.
    Pass,
    /// The value violated the rule. Formatting is deferred; only the
    /// template and its rendered arguments are stored.
    Fail {
        /// Message template with positional `{0}`-style placeholders.
        template: Cow<'static, str>,
        /// Arguments for the template, in placeholder order.
        args: MessageArgs,
    },
    /// The rule cannot run because its required configuration is missing.
    /// Aborts the validation call with a distinguishable error.
    Misconfigured {
        /// What is missing or malformed.
        reason: Cow<'static, str>,
    },
    /// Evaluation failed unexpectedly. Aborts the validation call; the
    /// result tree would otherwise have undefined provenance.
    Fatal {
        /// The underlying failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RuleCheck {
    /// A passing verdict.
    #[must_use]
    pub fn pass() -> Self {
        Self::Pass
    }

    /// A failing verdict with a message template and no arguments yet.
    #[must_use]
    pub fn fail(template: impl Into<Cow<'static, str>>) -> Self {
        Self::Fail {
            template: template.into(),
            args: MessageArgs::new(),
        }
    }

    /// A failing verdict with pre-built arguments.
    #[must_use]
    pub fn fail_with(template: impl Into<Cow<'static, str>>, args: MessageArgs) -> Self {
        Self::Fail {
            template: template.into(),
            args,
        }
    }

    /// A misconfiguration verdict; fatal for the validation call.
    #[must_use]
    pub fn misconfigured(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Misconfigured {
            reason: reason.into(),
        }
    }

    /// A fatal evaluation failure; fatal for the validation call.
    #[must_use]
    pub fn fatal(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fatal {
            source: Box::new(source),
        }
    }

    /// Appends a display-rendered argument to a failing verdict.
    ///
    /// No-op on every other variant.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_arg(mut self, arg: impl Display) -> Self {
        if let Self::Fail { args, .. } = &mut self {
            args.push(Cow::Owned(arg.to_string()));
        }
        self
    }

    /// Returns true for [`RuleCheck::Pass`].
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Converts a boolean condition into a verdict; the failure constructor
    /// runs only when the condition is false.
    #[must_use]
    pub fn from_condition(ok: bool, fail: impl FnOnce() -> RuleCheck) -> Self {
        if ok { Self::Pass } else { fail() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_is_passed() {
        assert!(RuleCheck::pass().passed());
        assert!(!RuleCheck::fail("nope").passed());
    }

    #[test]
    fn fail_collects_args_in_order() {
        let check = RuleCheck::fail("The field {0} must be within {1} and {2}.")
            .with_arg("Age")
            .with_arg(18)
            .with_arg(120);
        match check {
            RuleCheck::Fail { template, args } => {
                assert_eq!(template, "The field {0} must be within {1} and {2}.");
                assert_eq!(args.as_slice(), ["Age", "18", "120"]);
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    #[test]
    fn with_arg_ignores_non_failures() {
        assert!(RuleCheck::pass().with_arg("ignored").passed());
    }

    #[test]
    fn static_template_stays_borrowed() {
        let check = RuleCheck::fail("static template");
        match check {
            RuleCheck::Fail { template, .. } => {
                assert!(matches!(template, Cow::Borrowed(_)));
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    #[test]
    fn from_condition_short_circuits_failure_construction() {
        let check = RuleCheck::from_condition(true, || unreachable!());
        assert!(check.passed());
    }
}
