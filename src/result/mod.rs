//! The immutable result tree produced by a validate call.
//!
//! Structure mirrors the schema: a [`ValidationResult`] holds one
//! [`PropertyResult`] per validated member (registration order preserved),
//! each of which holds its [`ChainResult`]s and, for members with their own
//! schemas, a nested subtree. Failures are plain data in the tree, never
//! `Err` values; see [`EngineError`](crate::foundation::EngineError) for
//! what aborts a call instead.

pub mod chain;
pub mod property;
pub mod validation;

pub use chain::ChainResult;
pub use property::{NestedResults, PropertyResult};
pub use validation::{ErrorRecord, ValidationResult};
