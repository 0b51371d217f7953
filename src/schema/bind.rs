//! Binding of typed rules and nested schemas into object-safe plan steps.
//!
//! A [`Rule`] knows only its input type; a schema needs steps it can run
//! against the whole instance. [`BoundRule`] pairs a rule with the member
//! accessor and erases both behind [`MemberRule`], so a chain is just a
//! `Vec` of boxed steps regardless of the concrete rule types inside.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::engine::config::ValidationConfig;
use crate::engine::{self, Traversal};
use crate::foundation::{AsyncRule, EngineError, ExecutionStrategy, Rule, RuleCheck};
use crate::result::NestedResults;
use crate::schema::Validatable;

/// Extracts one member's value from the instance.
///
/// Returns `None` when the value is absent (an optional member whose guard
/// already stopped the chain); the step then records nothing.
pub(crate) type Accessor<T, M> =
    Arc<dyn for<'a> Fn(&'a T) -> Option<&'a M> + Send + Sync>;

/// A sync rule bound to its member, erased for chain storage.
pub(crate) trait MemberRule<T>: Send + Sync {
    fn code(&self) -> &'static str;
    fn rule_name(&self) -> &'static str;
    fn check(
        &self,
        instance: &T,
        member: &str,
        config: &ValidationConfig,
    ) -> Result<Option<RuleCheck>, EngineError>;
}

/// An async rule bound to its member, erased for chain storage.
#[async_trait]
pub(crate) trait AsyncMemberRule<T>: Send + Sync {
    fn code(&self) -> &'static str;
    fn rule_name(&self) -> &'static str;
    async fn check(
        &self,
        instance: &T,
        member: &str,
        config: &ValidationConfig,
    ) -> Result<Option<RuleCheck>, EngineError>;
}

/// One registered step of a chain, with the strategy attached at
/// registration time.
pub(crate) enum ChainStep<T> {
    Sync {
        rule: Box<dyn MemberRule<T>>,
        strategy: ExecutionStrategy,
    },
    Async {
        rule: Box<dyn AsyncMemberRule<T>>,
        strategy: ExecutionStrategy,
    },
}

/// One chain of a member: an ordered list of steps under a name.
pub(crate) struct ChainPlan<T> {
    pub(crate) name: Cow<'static, str>,
    pub(crate) steps: Vec<ChainStep<T>>,
}

/// Everything registered for one member: its chains plus an optional
/// nested-schema binding.
pub(crate) struct MemberPlan<T> {
    pub(crate) member: &'static str,
    pub(crate) chains: Vec<ChainPlan<T>>,
    pub(crate) nested: Option<Box<dyn NestedBinding<T>>>,
}

/// Applies the call's configurator to a rule instance.
///
/// A replacement of a different concrete type aborts the call: silently
/// ignoring it would run a rule the caller believes was replaced.
fn reconfigured<R: Any + Send + Sync>(
    rule: &R,
    name: &'static str,
    config: &ValidationConfig,
) -> Result<Option<R>, EngineError> {
    let Some(configurator) = config.configurator() else {
        return Ok(None);
    };
    let Some(replacement) = configurator.reconfigure(rule) else {
        return Ok(None);
    };
    match replacement.downcast::<R>() {
        Ok(rule) => Ok(Some(*rule)),
        Err(_) => Err(EngineError::misconfigured(
            name,
            "configurator returned a replacement of a different type",
        )),
    }
}

pub(crate) struct BoundRule<T, M: ?Sized, R> {
    rule: R,
    accessor: Accessor<T, M>,
}

impl<T, M: ?Sized, R> BoundRule<T, M, R> {
    pub(crate) fn new(rule: R, accessor: Accessor<T, M>) -> Self {
        Self { rule, accessor }
    }
}

impl<T, M, R> MemberRule<T> for BoundRule<T, M, R>
where
    T: Send + Sync + 'static,
    M: ?Sized + Sync + 'static,
    R: Rule<Input = M>,
{
    fn code(&self) -> &'static str {
        self.rule.code()
    }

    fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    fn check(
        &self,
        instance: &T,
        member: &str,
        config: &ValidationConfig,
    ) -> Result<Option<RuleCheck>, EngineError> {
        let Some(value) = (self.accessor)(instance) else {
            return Ok(None);
        };
        let verdict = match reconfigured(&self.rule, self.rule.name(), config)? {
            Some(rule) => rule.check(member, value),
            None => self.rule.check(member, value),
        };
        Ok(Some(verdict))
    }
}

pub(crate) struct BoundAsyncRule<T, M: ?Sized, R> {
    rule: R,
    accessor: Accessor<T, M>,
}

impl<T, M: ?Sized, R> BoundAsyncRule<T, M, R> {
    pub(crate) fn new(rule: R, accessor: Accessor<T, M>) -> Self {
        Self { rule, accessor }
    }
}

#[async_trait]
impl<T, M, R> AsyncMemberRule<T> for BoundAsyncRule<T, M, R>
where
    T: Send + Sync + 'static,
    M: ?Sized + Sync + 'static,
    R: AsyncRule<Input = M>,
{
    fn code(&self) -> &'static str {
        self.rule.code()
    }

    fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    async fn check(
        &self,
        instance: &T,
        member: &str,
        config: &ValidationConfig,
    ) -> Result<Option<RuleCheck>, EngineError> {
        let Some(value) = (self.accessor)(instance) else {
            return Ok(None);
        };
        let verdict = match reconfigured(&self.rule, self.rule.name(), config)? {
            Some(rule) => rule.check(member, value).await,
            None => self.rule.check(member, value).await,
        };
        Ok(Some(verdict))
    }
}

// ===== Nested schema bindings =====

/// Recursion into a member whose type carries its own schema.
///
/// Implementations push any index segments onto the traversal path; the
/// member segment itself is pushed by the schema runner before the binding
/// is invoked.
pub(crate) trait NestedBinding<T>: Send + Sync {
    fn run<'a>(
        &'a self,
        instance: &'a T,
        config: &'a ValidationConfig,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Result<NestedResults, EngineError>>;
}

pub(crate) struct SingleNested<A> {
    pub(crate) accessor: A,
}

impl<T, N, A> NestedBinding<T> for SingleNested<A>
where
    T: Send + Sync + 'static,
    N: Validatable,
    A: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
{
    fn run<'a>(
        &'a self,
        instance: &'a T,
        config: &'a ValidationConfig,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Result<NestedResults, EngineError>> {
        Box::pin(async move {
            let value = (self.accessor)(instance);
            let result = engine::run_schema(N::schema(), value, config, traversal).await?;
            Ok(NestedResults::Single(result))
        })
    }
}

pub(crate) struct OptionalNested<A> {
    pub(crate) accessor: A,
}

impl<T, N, A> NestedBinding<T> for OptionalNested<A>
where
    T: Send + Sync + 'static,
    N: Validatable,
    A: for<'a> Fn(&'a T) -> Option<&'a N> + Send + Sync + 'static,
{
    fn run<'a>(
        &'a self,
        instance: &'a T,
        config: &'a ValidationConfig,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Result<NestedResults, EngineError>> {
        Box::pin(async move {
            match (self.accessor)(instance) {
                Some(value) => {
                    let result =
                        engine::run_schema(N::schema(), value, config, traversal).await?;
                    Ok(NestedResults::Single(result))
                }
                None => Ok(NestedResults::None),
            }
        })
    }
}

pub(crate) struct EachNested<A> {
    pub(crate) accessor: A,
}

impl<T, N, A> NestedBinding<T> for EachNested<A>
where
    T: Send + Sync + 'static,
    N: Validatable,
    A: for<'a> Fn(&'a T) -> &'a [N] + Send + Sync + 'static,
{
    fn run<'a>(
        &'a self,
        instance: &'a T,
        config: &'a ValidationConfig,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Result<NestedResults, EngineError>> {
        Box::pin(async move {
            let mut entries = Vec::new();
            for (index, element) in (self.accessor)(instance).iter().enumerate() {
                traversal.push_segment(index.to_string());
                let run = engine::run_schema(N::schema(), element, config, traversal).await;
                traversal.pop_segment();
                entries.push((index, run?));
            }
            Ok(NestedResults::Collection(entries))
        })
    }
}

pub(crate) struct EachOptionalNested<A> {
    pub(crate) accessor: A,
}

impl<T, N, A> NestedBinding<T> for EachOptionalNested<A>
where
    T: Send + Sync + 'static,
    N: Validatable,
    A: for<'a> Fn(&'a T) -> &'a [Option<N>] + Send + Sync + 'static,
{
    fn run<'a>(
        &'a self,
        instance: &'a T,
        config: &'a ValidationConfig,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, Result<NestedResults, EngineError>> {
        Box::pin(async move {
            let mut entries = Vec::new();
            // Absent elements are skipped; surviving entries keep their
            // original indices so reported paths stay accurate.
            for (index, element) in (self.accessor)(instance).iter().enumerate() {
                let Some(element) = element else { continue };
                traversal.push_segment(index.to_string());
                let run = engine::run_schema(N::schema(), element, config, traversal).await;
                traversal.pop_segment();
                entries.push((index, run?));
            }
            Ok(NestedResults::Collection(entries))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::RuleConfigurator;
    use crate::rules::numeric::InRange;

    struct Holder {
        age: i64,
    }

    fn age_rule(min: i64, max: i64) -> BoundRule<Holder, i64, InRange<i64>> {
        BoundRule::new(InRange::new(min, max), Arc::new(|h: &Holder| Some(&h.age)))
    }

    #[test]
    fn bound_rule_reads_through_accessor() {
        let bound = age_rule(0, 120);
        let config = ValidationConfig::new();
        let verdict = bound.check(&Holder { age: 30 }, "Age", &config).unwrap();
        assert!(verdict.unwrap().passed());
    }

    #[test]
    fn configurator_replaces_rule_for_one_call() {
        struct Widen;
        impl RuleConfigurator for Widen {
            fn reconfigure(&self, rule: &dyn Any) -> Option<Box<dyn Any + Send + Sync>> {
                rule.downcast_ref::<InRange<i64>>()
                    .map(|_| Box::new(InRange::new(0i64, 200)) as Box<dyn Any + Send + Sync>)
            }
        }

        let bound = age_rule(0, 120);
        let strict = ValidationConfig::new();
        let relaxed = ValidationConfig::new().with_configurator(Widen);
        let holder = Holder { age: 150 };

        let verdict = bound.check(&holder, "Age", &strict).unwrap();
        assert!(!verdict.unwrap().passed());
        let verdict = bound.check(&holder, "Age", &relaxed).unwrap();
        assert!(verdict.unwrap().passed());
    }

    #[test]
    fn wrong_replacement_type_aborts() {
        struct Sabotage;
        impl RuleConfigurator for Sabotage {
            fn reconfigure(&self, _rule: &dyn Any) -> Option<Box<dyn Any + Send + Sync>> {
                Some(Box::new(42u8))
            }
        }

        let bound = age_rule(0, 120);
        let config = ValidationConfig::new().with_configurator(Sabotage);
        let err = bound.check(&Holder { age: 30 }, "Age", &config).unwrap_err();
        assert!(matches!(err, EngineError::Misconfigured { .. }));
    }

    #[test]
    fn absent_value_records_nothing() {
        let bound: BoundRule<Holder, i64, InRange<i64>> =
            BoundRule::new(InRange::new(0, 120), Arc::new(|_: &Holder| None));
        let config = ValidationConfig::new();
        let verdict = bound.check(&Holder { age: 30 }, "Age", &config).unwrap();
        assert!(verdict.is_none());
    }
}
