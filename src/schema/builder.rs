//! Fluent construction of schemas.
//!
//! Registration order is execution order at every level: members run in the
//! order `member` was called, chains in the order they were added, rules in
//! the order they appear in their chain.

use std::borrow::Cow;
use std::sync::Arc;

use crate::foundation::{AsyncRule, ExecutionStrategy, Rule};
use crate::rules::general::Optional;
use crate::schema::bind::{
    Accessor, BoundAsyncRule, BoundRule, ChainPlan, ChainStep, EachNested, EachOptionalNested,
    MemberPlan, OptionalNested, SingleNested,
};
use crate::schema::{DEFAULT_CHAIN, Schema, Validatable};

/// Builds a [`Schema`] member by member.
///
/// # Examples
///
/// ```rust,ignore
/// let schema = Schema::<User>::builder()
///     .member("Name", |m| {
///         m.chain(|u: &User| &u.name, |c| c.rule(required()))
///     })
///     .member("Age", |m| {
///         m.chain(|u: &User| &u.age, |c| c.rule(in_range(0, 120)))
///     })
///     .build();
/// ```
pub struct SchemaBuilder<T> {
    members: Vec<MemberPlan<T>>,
}

impl<T: Send + Sync + 'static> SchemaBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Registers a member. Member names must be unique within a schema.
    #[must_use]
    pub fn member(
        mut self,
        name: &'static str,
        build: impl FnOnce(MemberBuilder<T>) -> MemberBuilder<T>,
    ) -> Self {
        debug_assert!(
            self.members.iter().all(|m| m.member != name),
            "member `{name}` registered twice"
        );
        let built = build(MemberBuilder::new(name));
        self.members.push(built.into_plan());
        self
    }

    /// Finalizes the schema.
    #[must_use]
    pub fn build(self) -> Schema<T> {
        let has_async = self.members.iter().any(|member| {
            member.chains.iter().any(|chain| {
                chain
                    .steps
                    .iter()
                    .any(|step| matches!(step, ChainStep::Async { .. }))
            })
        });
        Schema::from_parts(self.members, has_async)
    }
}

/// Builds one member's chains and nested binding.
pub struct MemberBuilder<T> {
    member: &'static str,
    chains: Vec<ChainPlan<T>>,
    nested: Option<Box<dyn crate::schema::bind::NestedBinding<T>>>,
}

impl<T: Send + Sync + 'static> MemberBuilder<T> {
    fn new(member: &'static str) -> Self {
        Self {
            member,
            chains: Vec::new(),
            nested: None,
        }
    }

    fn into_plan(self) -> MemberPlan<T> {
        MemberPlan {
            member: self.member,
            chains: self.chains,
            nested: self.nested,
        }
    }

    /// Adds the member's default chain.
    ///
    /// The accessor extracts the value the chain's rules will see; the
    /// closure adds the rules.
    #[must_use]
    pub fn chain<M, M2, A, F>(self, accessor: A, build: F) -> Self
    where
        M: ?Sized + Sync + 'static,
        M2: ?Sized + Sync + 'static,
        A: for<'a> Fn(&'a T) -> &'a M + Send + Sync + 'static,
        F: FnOnce(ChainBuilder<T, M>) -> ChainBuilder<T, M2>,
    {
        self.named_chain(DEFAULT_CHAIN, accessor, build)
    }

    /// Adds a named chain. A member may carry several independent chains;
    /// each records its outcomes under its own name.
    #[must_use]
    pub fn named_chain<M, M2, A, F>(mut self, name: &'static str, accessor: A, build: F) -> Self
    where
        M: ?Sized + Sync + 'static,
        M2: ?Sized + Sync + 'static,
        A: for<'a> Fn(&'a T) -> &'a M + Send + Sync + 'static,
        F: FnOnce(ChainBuilder<T, M>) -> ChainBuilder<T, M2>,
    {
        let accessor: Accessor<T, M> = Arc::new(move |instance| Some(accessor(instance)));
        let built = build(ChainBuilder {
            name: Cow::Borrowed(name),
            accessor,
            steps: Vec::new(),
        });
        self.chains.push(ChainPlan {
            name: built.name,
            steps: built.steps,
        });
        self
    }

    /// Recurses into a member whose type carries its own schema.
    #[must_use]
    pub fn nested<N, A>(mut self, accessor: A) -> Self
    where
        N: Validatable,
        A: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.nested = Some(Box::new(SingleNested { accessor }));
        self
    }

    /// Recurses into an optional nested member; absent records nothing.
    #[must_use]
    pub fn nested_optional<N, A>(mut self, accessor: A) -> Self
    where
        N: Validatable,
        A: for<'a> Fn(&'a T) -> Option<&'a N> + Send + Sync + 'static,
    {
        self.nested = Some(Box::new(OptionalNested { accessor }));
        self
    }

    /// Recurses into every element of a collection member. Element indices
    /// become path segments in the report (`Addresses.0.Street`).
    #[must_use]
    pub fn nested_each<N, A>(mut self, accessor: A) -> Self
    where
        N: Validatable,
        A: for<'a> Fn(&'a T) -> &'a [N] + Send + Sync + 'static,
    {
        self.nested = Some(Box::new(EachNested { accessor }));
        self
    }

    /// Like [`nested_each`](Self::nested_each) for collections of optional
    /// elements: absent elements are skipped, present ones keep their
    /// original indices.
    #[must_use]
    pub fn nested_each_optional<N, A>(mut self, accessor: A) -> Self
    where
        N: Validatable,
        A: for<'a> Fn(&'a T) -> &'a [Option<N>] + Send + Sync + 'static,
    {
        self.nested = Some(Box::new(EachOptionalNested { accessor }));
        self
    }
}

/// Builds one chain's ordered rule list.
pub struct ChainBuilder<T, M: ?Sized> {
    name: Cow<'static, str>,
    accessor: Accessor<T, M>,
    steps: Vec<ChainStep<T>>,
}

impl<T, M> ChainBuilder<T, M>
where
    T: Send + Sync + 'static,
    M: ?Sized + Sync + 'static,
{
    /// Adds a rule with the default strategy
    /// ([`ExecutionStrategy::ValidateAndStop`]).
    #[must_use]
    pub fn rule<R>(self, rule: R) -> Self
    where
        R: Rule<Input = M>,
    {
        self.rule_with(rule, ExecutionStrategy::default())
    }

    /// Adds a rule with an explicit strategy.
    #[must_use]
    pub fn rule_with<R>(mut self, rule: R, strategy: ExecutionStrategy) -> Self
    where
        R: Rule<Input = M>,
    {
        self.steps.push(ChainStep::Sync {
            rule: Box::new(BoundRule::new(rule, Arc::clone(&self.accessor))),
            strategy,
        });
        self
    }

    /// Adds an async rule with the default strategy. A schema containing
    /// any async rule must be run through the async entrypoints.
    #[must_use]
    pub fn async_rule<R>(self, rule: R) -> Self
    where
        R: AsyncRule<Input = M>,
    {
        self.async_rule_with(rule, ExecutionStrategy::default())
    }

    /// Adds an async rule with an explicit strategy.
    #[must_use]
    pub fn async_rule_with<R>(mut self, rule: R, strategy: ExecutionStrategy) -> Self
    where
        R: AsyncRule<Input = M>,
    {
        self.steps.push(ChainStep::Async {
            rule: Box::new(BoundAsyncRule::new(rule, Arc::clone(&self.accessor))),
            strategy,
        });
        self
    }
}

impl<T, U> ChainBuilder<T, Option<U>>
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
{
    /// Marks the chain's value as optional and continues building against
    /// the inner type.
    ///
    /// Registers an [`Optional`] guard with
    /// [`ExecutionStrategy::SkipErrorAndStop`]: an absent value records one
    /// forced-success outcome and ends the chain, a present value unwraps
    /// and runs the remaining rules.
    #[must_use]
    pub fn optional(self) -> ChainBuilder<T, U> {
        let guarded = self.rule_with(Optional::new(), ExecutionStrategy::SkipErrorAndStop);
        let outer = Arc::clone(&guarded.accessor);
        ChainBuilder {
            name: guarded.name,
            accessor: Arc::new(move |instance| outer(instance).and_then(Option::as_ref)),
            steps: guarded.steps,
        }
    }

    /// Like [`optional`](Self::optional), continuing against the deref
    /// target instead of the inner type, so an `Option<String>` chain takes
    /// `str` rules.
    #[must_use]
    pub fn optional_deref(self) -> ChainBuilder<T, U::Target>
    where
        U: std::ops::Deref,
        U::Target: Sync + 'static,
    {
        let guarded = self.rule_with(Optional::new(), ExecutionStrategy::SkipErrorAndStop);
        let outer = Arc::clone(&guarded.accessor);
        ChainBuilder {
            name: guarded.name,
            accessor: Arc::new(move |instance| outer(instance).and_then(|value| value.as_deref())),
            steps: guarded.steps,
        }
    }
}
