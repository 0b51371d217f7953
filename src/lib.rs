//! # rulechain
//!
//! A chain-based, type-safe validation engine with strategy-driven
//! short-circuiting and path-addressable error reports.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::LazyLock;
//! use rulechain::prelude::*;
//!
//! struct User {
//!     name: Option<String>,
//!     age: i64,
//! }
//!
//! impl Validatable for User {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<User>> = LazyLock::new(|| {
//!             Schema::builder()
//!                 .member("Name", |m| {
//!                     m.chain(|u: &User| &u.name, |c| {
//!                         c.rule(required()).optional_deref().rule(min_length(2))
//!                     })
//!                 })
//!                 .member("Age", |m| {
//!                     m.chain(|u: &User| &u.age, |c| c.rule(in_range(0, 120)))
//!                 })
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! let report = user.validate()?;
//! if report.has_errors_at(&["Age"]) {
//!     for error in report.errors() {
//!         println!("{}: {}", error.path_string(), error.message);
//!     }
//! }
//! ```
//!
//! ## How It Works
//!
//! Each member of a type carries one or more **chains** of
//! [`Rule`](foundation::Rule)s. Rules run in registration order; after each
//! one, its [`ExecutionStrategy`](foundation::ExecutionStrategy) decides
//! whether the chain continues, so a failed prerequisite (a null check, say)
//! keeps later rules from piling errors onto the same value. Every executed
//! rule leaves an immutable [`RuleOutcome`](foundation::RuleOutcome) in the
//! result tree, successes included, and messages are formatted lazily from
//! template + arguments.
//!
//! Members whose types implement [`Validatable`](schema::Validatable) can be
//! validated recursively, with collection indices appearing as path segments
//! (`Addresses.0.Street`) in the flattened report.
//!
//! ## Creating Rules
//!
//! Use the [`rule!`] macro for zero-boilerplate rules, or implement
//! [`Rule`](foundation::Rule) (or [`AsyncRule`](foundation::AsyncRule) for
//! I/O-backed checks) manually.
//!
//! ## Built-in Rules
//!
//! - **Presence**: [`Required`](rules::Required), [`Optional`](rules::Optional),
//!   [`WhenPresent`](rules::WhenPresent)
//! - **Equality**: [`EqualTo`](rules::EqualTo), [`NotEqualTo`](rules::NotEqualTo)
//! - **Numeric**: [`InRange`](rules::InRange), [`GreaterThan`](rules::GreaterThan),
//!   [`LessThan`](rules::LessThan)
//! - **String**: [`NotEmpty`](rules::NotEmpty), [`MinLength`](rules::MinLength),
//!   [`MaxLength`](rules::MaxLength), [`Matches`](rules::Matches)
//! - **Collection**: [`HasElements`](rules::HasElements), [`MinCount`](rules::MinCount),
//!   [`MaxCount`](rules::MaxCount), [`NoNullElements`](rules::NoNullElements)

// Builder signatures (accessor + closure over a generic chain builder) are
// inherent to the typed registration API.
#![allow(clippy::type_complexity)]

pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod result;
pub mod rules;
pub mod schema;
