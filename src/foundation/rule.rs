//! Core rule traits.
//!
//! A rule is a single named validation unit bound to one input type. The
//! engine depends only on these contracts, never on concrete rule types.

use async_trait::async_trait;

use crate::foundation::check::RuleCheck;

/// A synchronous validation rule.
///
/// Rules are pure functions of their inputs and their own configured
/// parameters (a bound, a pattern); they never mutate shared state. The
/// member name is passed in so failure messages can interpolate it.
///
/// # Type Parameters
///
/// * `Input` — the type being validated; may be `?Sized` for DSTs like `str`
///   and `[T]`.
///
/// # Examples
///
/// ```rust,ignore
/// use rulechain::foundation::{Rule, RuleCheck};
///
/// struct MinLength { min: usize }
///
/// impl Rule for MinLength {
///     type Input = str;
///
///     fn code(&self) -> &'static str { "min_length" }
///
///     fn check(&self, member: &str, value: &str) -> RuleCheck {
///         RuleCheck::from_condition(value.len() >= self.min, || {
///             RuleCheck::fail("The field {0} must be at least {1} characters long.")
///                 .with_arg(member)
///                 .with_arg(self.min)
///         })
///     }
/// }
/// ```
pub trait Rule: Send + Sync + 'static {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Stable error code identifying this rule's failure kind.
    ///
    /// Used for programmatic handling and i18n ("not_null", "out_of_range").
    fn code(&self) -> &'static str;

    /// Rule name for reports and diagnostics; defaults to the short type name.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Evaluates the rule against one member's value.
    fn check(&self, member: &str, value: &Self::Input) -> RuleCheck;
}

/// An asynchronous validation rule, for checks that perform I/O
/// (uniqueness lookups, remote policy checks).
///
/// Chains await each async rule in turn before advancing, so declaration
/// order is preserved regardless of the sync/async mix.
#[async_trait]
pub trait AsyncRule: Send + Sync + 'static {
    /// The type of input being validated.
    type Input: ?Sized + Sync;

    /// Stable error code identifying this rule's failure kind.
    fn code(&self) -> &'static str;

    /// Rule name for reports and diagnostics; defaults to the short type name.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Evaluates the rule against one member's value.
    async fn check(&self, member: &str, value: &Self::Input) -> RuleCheck;
}

/// Returns the type name of `T` without its module path or generic
/// arguments: `Required<Option<String>>` reports as `Required`.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &head[idx + 2..],
        None => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysPass;

    impl Rule for AlwaysPass {
        type Input = str;

        fn code(&self) -> &'static str {
            "always_pass"
        }

        fn check(&self, _member: &str, _value: &str) -> RuleCheck {
            RuleCheck::pass()
        }
    }

    #[test]
    fn rule_default_name_is_short_type_name() {
        assert_eq!(AlwaysPass.name(), "AlwaysPass");
    }

    #[test]
    fn rule_check_runs() {
        assert!(AlwaysPass.check("field", "value").passed());
    }

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<str>(), "str");
    }
}
