//! Prelude module for convenient imports.
//!
//! Provides a single `use rulechain::prelude::*;` import that brings in all
//! commonly needed traits, types, and built-in rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulechain::prelude::*;
//!
//! let schema = Schema::<User>::builder()
//!     .member("Name", |m| {
//!         m.chain(|u: &User| &u.name, |c| c.rule(required()).optional_deref().rule(min_length(2)))
//!     })
//!     .member("Age", |m| m.chain(|u: &User| &u.age, |c| c.rule(in_range(0, 120))))
//!     .build();
//! ```

// ============================================================================
// FOUNDATION: Core traits, verdicts, flow control, errors
// ============================================================================

pub use crate::foundation::{
    AsyncRule, ChainFlow, DefaultFormatter, EngineError, ExecutionStrategy, Formatter,
    MessageArgs, Rule, RuleCheck, RuleOutcome,
};

// ============================================================================
// SCHEMA: Registration and entrypoints
// ============================================================================

pub use crate::schema::{
    ChainBuilder, DEFAULT_CHAIN, MemberBuilder, Schema, SchemaBuilder, Validatable,
    ValidatableExt,
};

// ============================================================================
// ENGINE: Per-call options
// ============================================================================

pub use crate::engine::{RuleConfigurator, ValidationConfig};

// ============================================================================
// RESULTS: The report tree
// ============================================================================

pub use crate::result::{
    ChainResult, ErrorRecord, NestedResults, PropertyResult, ValidationResult,
};

// ============================================================================
// RULES: All built-in rules and their factories
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::rules::*;
pub use crate::rules::collection::{has_elements, max_count, min_count, no_null_elements};
pub use crate::rules::general::{equal_to, not_equal_to, required, when_present};
pub use crate::rules::numeric::{greater_than, in_range, less_than};
pub use crate::rules::string::{matches, max_length, min_length, not_empty};
