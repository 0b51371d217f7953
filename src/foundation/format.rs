//! Message formatting, deferred and pluggable.
//!
//! Outcomes store template + arguments only; formatting happens when the
//! result tree is queried. The same immutable tree can therefore be
//! re-formatted with a different formatter after the fact.

use crate::foundation::outcome::RuleOutcome;

/// Renders a rule outcome's message.
///
/// Invoked lazily by the result tree's message accessors, never during
/// evaluation. Implementations must be pure: formatting the same outcome
/// twice yields the same string and mutates nothing.
pub trait Formatter: Send + Sync {
    /// Formats the outcome's template with its arguments.
    fn format(&self, outcome: &RuleOutcome) -> String;
}

/// The built-in formatter: positional `{0}`-style placeholder substitution.
///
/// # Examples
///
/// ```rust,ignore
/// // template: "The field {0} must be within {1} and {2}."
/// // args:     ["Age", "18", "120"]
/// // output:   "The field Age must be within 18 and 120."
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn format(&self, outcome: &RuleOutcome) -> String {
        let args = outcome.args();
        let mut message = String::with_capacity(outcome.template().len());
        let mut rest = outcome.template();
        // Single left-to-right scan over the template only, so argument text
        // that happens to contain `{N}` is never re-substituted.
        while let Some(open) = rest.find('{') {
            message.push_str(&rest[..open]);
            let tail = &rest[open + 1..];
            let placeholder = tail
                .find('}')
                .filter(|&close| close > 0 && tail[..close].bytes().all(|b| b.is_ascii_digit()));
            match placeholder {
                Some(close) => {
                    match tail[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                        Some(arg) => message.push_str(arg),
                        // Unfilled placeholders are kept verbatim.
                        None => message.push_str(&rest[open..=open + close + 1]),
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    message.push('{');
                    rest = tail;
                }
            }
        }
        message.push_str(rest);
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::check::RuleCheck;

    fn outcome(template: &'static str, args: &[&str]) -> RuleOutcome {
        let mut check = RuleCheck::fail(template);
        for arg in args {
            check = check.with_arg(arg);
        }
        match check {
            RuleCheck::Fail { template, args } => {
                RuleOutcome::failed("test", "Test", template, args)
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    #[test]
    fn substitutes_positional_placeholders() {
        let o = outcome("The field {0} must be within {1} and {2}.", &["Age", "18", "120"]);
        assert_eq!(
            DefaultFormatter.format(&o),
            "The field Age must be within 18 and 120."
        );
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let o = outcome("{0} and {0} again", &["x"]);
        assert_eq!(DefaultFormatter.format(&o), "x and x again");
    }

    #[test]
    fn missing_args_leave_placeholders() {
        let o = outcome("needs {0} and {1}", &["only-one"]);
        assert_eq!(DefaultFormatter.format(&o), "needs only-one and {1}");
    }

    #[test]
    fn argument_text_is_never_reinterpreted() {
        // An argument containing placeholder syntax must land verbatim, not
        // have later arguments spliced into it.
        let o = outcome("{0} and {1}", &["literal {1} inside", "second"]);
        assert_eq!(
            DefaultFormatter.format(&o),
            "literal {1} inside and second"
        );
    }

    #[test]
    fn non_placeholder_braces_pass_through() {
        let o = outcome("keep {} and {not-an-index} but fill {0}", &["x"]);
        assert_eq!(
            DefaultFormatter.format(&o),
            "keep {} and {not-an-index} but fill x"
        );
    }

    #[test]
    fn formatting_is_repeatable() {
        let o = outcome("field {0}", &["Name"]);
        assert_eq!(DefaultFormatter.format(&o), DefaultFormatter.format(&o));
    }
}
