//! The traversal engine: walks a schema over an instance and builds the
//! result tree.
//!
//! Evaluation is async-first; the synchronous entrypoints on
//! [`Schema`](crate::schema::Schema) drive the same traversal to completion
//! without a runtime when no rule actually suspends. Members run in
//! registration order, chains left to right, and each chain awaits every
//! rule before advancing, so the recorded order is deterministic regardless
//! of the sync/async mix.

pub mod config;

use std::any::TypeId;

use tracing::{debug, trace};

use crate::foundation::{ChainFlow, EngineError, RuleCheck, RuleOutcome};
use crate::result::{ChainResult, PropertyResult, ValidationResult};
use crate::schema::Schema;
use crate::schema::bind::{ChainPlan, ChainStep, MemberPlan};

pub use config::{RuleConfigurator, ValidationConfig};

/// Mutable traversal state threaded through one validate call.
///
/// `visited` holds the instances currently on the recursion stack, keyed by
/// type and address. Keying by address alone is not enough: a struct's first
/// field shares its parent's address, and that is containment, not a cycle.
pub(crate) struct Traversal {
    visited: Vec<(TypeId, usize)>,
    path: Vec<String>,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Self {
            visited: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Registers an instance on the recursion stack; false means it is
    /// already there and the graph loops.
    fn enter(&mut self, key: (TypeId, usize)) -> bool {
        if self.visited.contains(&key) {
            return false;
        }
        self.visited.push(key);
        true
    }

    fn leave(&mut self) {
        self.visited.pop();
    }

    pub(crate) fn push_segment(&mut self, segment: String) {
        self.path.push(segment);
    }

    pub(crate) fn pop_segment(&mut self) {
        self.path.pop();
    }

    fn path_string(&self) -> String {
        self.path.join(".")
    }

    fn path_with(&self, member: &str) -> String {
        if self.path.is_empty() {
            member.to_string()
        } else {
            format!("{}.{}", self.path_string(), member)
        }
    }
}

/// Validates one instance against its schema, recursing into nested members.
pub(crate) async fn run_schema<T: Send + Sync + 'static>(
    schema: &Schema<T>,
    instance: &T,
    config: &ValidationConfig,
    traversal: &mut Traversal,
) -> Result<ValidationResult, EngineError> {
    let key = (TypeId::of::<T>(), std::ptr::from_ref(instance) as usize);
    if !traversal.enter(key) {
        let path = traversal.path_string();
        debug!(%path, "object graph cycle detected");
        return Err(EngineError::CycleDetected { path });
    }
    let run = run_members(schema, instance, config, traversal).await;
    traversal.leave();
    if traversal.visited.is_empty() {
        if let Ok(result) = &run {
            debug!(errors = result.errors_count(), "validation finished");
        }
    }
    run
}

async fn run_members<T: Send + Sync + 'static>(
    schema: &Schema<T>,
    instance: &T,
    config: &ValidationConfig,
    traversal: &mut Traversal,
) -> Result<ValidationResult, EngineError> {
    let mut result = ValidationResult::new();
    for plan in schema.members() {
        if config.is_cancelled() {
            let member = traversal.path_with(plan.member);
            debug!(%member, "validation cancelled");
            return Err(EngineError::Cancelled { member });
        }
        traversal.push_segment(plan.member.to_string());
        let run = run_member(plan, instance, config, traversal).await;
        traversal.pop_segment();
        result.insert(run?);
    }
    result.set_formatter(config.formatter());
    Ok(result)
}

async fn run_member<T: Send + Sync + 'static>(
    plan: &MemberPlan<T>,
    instance: &T,
    config: &ValidationConfig,
    traversal: &mut Traversal,
) -> Result<PropertyResult, EngineError> {
    let mut property = PropertyResult::new(plan.member.into());
    for chain in &plan.chains {
        property.push_chain(run_chain(chain, instance, plan.member, config).await?);
    }
    if let Some(nested) = &plan.nested {
        property.set_nested(nested.run(instance, config, traversal).await?);
    }
    Ok(property)
}

/// Runs one chain's steps in order, applying each rule's strategy to decide
/// whether the chain continues.
async fn run_chain<T: Send + Sync + 'static>(
    plan: &ChainPlan<T>,
    instance: &T,
    member: &'static str,
    config: &ValidationConfig,
) -> Result<ChainResult, EngineError> {
    let mut result = ChainResult::new(plan.name.clone(), member.into());
    for step in &plan.steps {
        let (verdict, code, name, strategy) = match step {
            ChainStep::Sync { rule, strategy } => (
                rule.check(instance, member, config)?,
                rule.code(),
                rule.rule_name(),
                *strategy,
            ),
            ChainStep::Async { rule, strategy } => (
                rule.check(instance, member, config).await?,
                rule.code(),
                rule.rule_name(),
                *strategy,
            ),
        };
        let Some(verdict) = verdict else {
            continue;
        };
        let outcome = match verdict {
            RuleCheck::Pass => RuleOutcome::passed(code, name),
            RuleCheck::Fail { template, args } => RuleOutcome::failed(code, name, template, args),
            RuleCheck::Misconfigured { reason } => {
                return Err(EngineError::Misconfigured { rule: name, reason });
            }
            RuleCheck::Fatal { source } => {
                return Err(EngineError::RuleFailed { rule: name, source });
            }
        };
        let (outcome, flow) = strategy.apply(outcome);
        trace!(
            member,
            chain = %plan.name,
            rule = name,
            success = outcome.is_success(),
            stop = flow == ChainFlow::Stop,
            "rule evaluated"
        );
        result.push(outcome);
        if flow == ChainFlow::Stop {
            break;
        }
    }
    Ok(result)
}
