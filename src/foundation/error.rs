//! Fatal errors raised by a validation call.
//!
//! Validation FAILURES are never errors: they are recorded as failing
//! outcomes inside the result tree. An `Err` from a validate entrypoint
//! means the call itself could not produce a trustworthy tree.

use std::borrow::Cow;

/// Fatal error from a top-level validate call.
///
/// Recoverable rule failures live in the [`ValidationResult`] tree; an
/// `EngineError` aborts the call and no partial tree is returned.
///
/// [`ValidationResult`]: crate::result::ValidationResult
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A rule lacked required configuration, or the rule configurator
    /// returned a replacement of the wrong concrete type.
    #[error("rule `{rule}` is misconfigured: {reason}")]
    Misconfigured {
        /// The rule that could not run.
        rule: &'static str,
        /// What is missing or malformed.
        reason: Cow<'static, str>,
    },

    /// A rule's evaluation failed unexpectedly.
    #[error("rule `{rule}` failed to evaluate")]
    RuleFailed {
        /// The rule that failed.
        rule: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A synchronous validate call reached an asynchronous rule.
    #[error("schema contains asynchronous rules; use `validate_async`")]
    AsyncSchema,

    /// The object graph loops back onto an instance already being validated.
    #[error("cycle detected in object graph at `{path}`")]
    CycleDetected {
        /// Dotted member path where the revisit happened.
        path: String,
    },

    /// The caller's cancellation token fired; partial results are discarded.
    #[error("validation cancelled before member `{member}`")]
    Cancelled {
        /// The member whose traversal was about to start.
        member: String,
    },
}

impl EngineError {
    pub(crate) fn misconfigured(rule: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Misconfigured {
            rule,
            reason: reason.into(),
        }
    }
}
