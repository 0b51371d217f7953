//! The immutable record of one rule execution inside a chain.

use std::borrow::Cow;

use serde::Serialize;

use crate::foundation::check::MessageArgs;
use crate::foundation::format::{DefaultFormatter, Formatter};

/// One executed rule's recorded result.
///
/// Outcomes are produced by the chain evaluator and are immutable once
/// appended to a [`ChainResult`](crate::result::ChainResult). The message is
/// NOT formatted here: the template and its arguments are stored as-is so the
/// result tree can be re-formatted with a different [`Formatter`] after the
/// fact.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    code: Cow<'static, str>,
    rule: Cow<'static, str>,
    success: bool,
    template: Cow<'static, str>,
    args: MessageArgs,
}

impl RuleOutcome {
    /// Records a passing rule execution.
    #[must_use]
    pub fn passed(code: &'static str, rule: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            rule: Cow::Borrowed(rule),
            success: true,
            template: Cow::Borrowed(""),
            args: MessageArgs::new(),
        }
    }

    /// Records a failing rule execution with its deferred message.
    #[must_use]
    pub fn failed(
        code: &'static str,
        rule: &'static str,
        template: Cow<'static, str>,
        args: MessageArgs,
    ) -> Self {
        Self {
            code: Cow::Borrowed(code),
            rule: Cow::Borrowed(rule),
            success: false,
            template,
            args,
        }
    }

    /// Rewrites this outcome as a forced success, keeping the rule identity.
    ///
    /// Used by the `SkipErrorAndStop` strategy: the optional marker's failure
    /// is reported as a single successful outcome that ends the chain.
    #[must_use]
    pub(crate) fn into_forced_success(mut self) -> Self {
        self.success = true;
        self.template = Cow::Borrowed("");
        self.args = MessageArgs::new();
        self
    }

    /// Stable error code of the rule that produced this outcome.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Short type name of the rule that produced this outcome.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Whether the rule passed (or was forced to pass by its strategy).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The unformatted message template (empty for successes).
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The template arguments, in placeholder order.
    #[must_use]
    pub fn args(&self) -> &[Cow<'static, str>] {
        &self.args
    }

    /// Formats the message with the default positional formatter.
    #[must_use]
    pub fn message(&self) -> String {
        self.format_with(&DefaultFormatter)
    }

    /// Formats the message with a caller-supplied formatter.
    ///
    /// Side-effect-free: the outcome is never mutated, so the same tree can
    /// be formatted any number of times with different formatters.
    #[must_use]
    pub fn format_with(&self, formatter: &dyn Formatter) -> String {
        formatter.format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::check::RuleCheck;

    fn failing_outcome() -> RuleOutcome {
        match RuleCheck::fail("The field {0} cannot be null.").with_arg("Name") {
            RuleCheck::Fail { template, args } => {
                RuleOutcome::failed("not_null", "Required", template, args)
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    #[test]
    fn passed_outcome_has_empty_template() {
        let outcome = RuleOutcome::passed("not_null", "Required");
        assert!(outcome.is_success());
        assert_eq!(outcome.template(), "");
        assert_eq!(outcome.code(), "not_null");
    }

    #[test]
    fn failed_outcome_formats_lazily() {
        let outcome = failing_outcome();
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "The field Name cannot be null.");
        // The template survives formatting untouched.
        assert_eq!(outcome.template(), "The field {0} cannot be null.");
    }

    #[test]
    fn forced_success_keeps_identity() {
        let outcome = failing_outcome().into_forced_success();
        assert!(outcome.is_success());
        assert_eq!(outcome.code(), "not_null");
        assert_eq!(outcome.rule(), "Required");
        assert_eq!(outcome.template(), "");
    }

    #[test]
    fn outcomes_serialize() {
        let json = serde_json::to_value(failing_outcome()).unwrap();
        assert_eq!(json["code"], "not_null");
        assert_eq!(json["success"], false);
    }
}
