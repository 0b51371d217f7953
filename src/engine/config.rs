//! Per-call configuration: formatter, rule configurator, cancellation.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::foundation::Formatter;

/// Rewrites rule instances just before they run.
///
/// The engine hands each rule to the configurator as `&dyn Any`; returning
/// `Some` replaces the rule for that single execution. The replacement MUST
/// be the same concrete type as the original, otherwise the validate call
/// aborts with [`EngineError::Misconfigured`](crate::foundation::EngineError).
///
/// The schema itself is never mutated: reconfiguration is scoped to the
/// call that carried the configurator.
///
/// # Examples
///
/// ```rust,ignore
/// struct Relax;
///
/// impl RuleConfigurator for Relax {
///     fn reconfigure(&self, rule: &dyn Any) -> Option<Box<dyn Any + Send + Sync>> {
///         let range = rule.downcast_ref::<InRange<i64>>()?;
///         Some(Box::new(InRange::new(range.min(), range.max() + 10)))
///     }
/// }
/// ```
pub trait RuleConfigurator: Send + Sync {
    /// Returns a replacement for the given rule, or `None` to keep it as-is.
    fn reconfigure(&self, rule: &dyn Any) -> Option<Box<dyn Any + Send + Sync>>;
}

/// Options for a single validate call.
///
/// All fields are optional; `ValidationConfig::default()` validates with the
/// default formatter, no reconfiguration, and no cancellation.
#[derive(Clone, Default)]
pub struct ValidationConfig {
    formatter: Option<Arc<dyn Formatter>>,
    configurator: Option<Arc<dyn RuleConfigurator>>,
    cancellation: Option<CancellationToken>,
}

impl ValidationConfig {
    /// An empty configuration, same as `Default::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter used by the returned tree's message accessors.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Configurator consulted before each rule runs.
    #[must_use]
    pub fn with_configurator(mut self, configurator: impl RuleConfigurator + 'static) -> Self {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    /// Token checked before each member's traversal; once cancelled the call
    /// returns `Err(Cancelled)` and no partial tree escapes.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        self.formatter.clone()
    }

    pub(crate) fn configurator(&self) -> Option<&dyn RuleConfigurator> {
        self.configurator.as_deref()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

impl fmt::Debug for ValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationConfig")
            .field("formatter", &self.formatter.is_some())
            .field("configurator", &self.configurator.is_some())
            .field("cancellation", &self.cancellation.is_some())
            .finish()
    }
}
