//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the engine:
//!
//! - **Traits**: [`Rule`], [`AsyncRule`], [`Formatter`]
//! - **Verdicts**: [`RuleCheck`], [`RuleOutcome`]
//! - **Flow control**: [`ExecutionStrategy`], [`ChainFlow`]
//! - **Errors**: [`EngineError`]
//!
//! # Architecture
//!
//! Rules are generic over their input type, providing compile-time
//! guarantees:
//!
//! ```rust,ignore
//! use rulechain::foundation::{Rule, RuleCheck};
//!
//! struct MinLength { min: usize }
//!
//! impl Rule for MinLength {
//!     type Input = str;  // only validates strings
//!
//!     fn code(&self) -> &'static str { "min_length" }
//!
//!     fn check(&self, member: &str, value: &str) -> RuleCheck {
//!         // ...
//!         # RuleCheck::pass()
//!     }
//! }
//! ```
//!
//! A rule reports pass/fail through [`RuleCheck`]; the chain evaluator turns
//! the verdict into an immutable [`RuleOutcome`] and consults the rule's
//! [`ExecutionStrategy`] to decide whether the chain continues. Messages are
//! stored as template + arguments and formatted lazily through a
//! [`Formatter`].

pub mod check;
pub mod error;
pub mod format;
pub mod outcome;
pub mod rule;
pub mod strategy;

pub use check::{MessageArgs, RuleCheck};
pub use error::EngineError;
pub use format::{DefaultFormatter, Formatter};
pub use outcome::RuleOutcome;
pub use rule::{AsyncRule, Rule, short_type_name};
pub use strategy::{ChainFlow, ExecutionStrategy};
