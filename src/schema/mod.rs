//! Schemas: per-type validation plans, registered once and reused.
//!
//! A [`Schema`] is built explicitly with [`Schema::builder`] and exposed
//! through the [`Validatable`] trait, typically from a `LazyLock` static so
//! registration cost is paid once per type:
//!
//! ```rust,ignore
//! impl Validatable for User {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<User>> = LazyLock::new(|| {
//!             Schema::builder()
//!                 .member("Name", |m| {
//!                     m.chain(|u: &User| &u.name, |c| c.rule(required()))
//!                 })
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! let report = user.validate()?;
//! ```
//!
//! Nesting is capability-checked at registration: `nested` and its variants
//! only accept members whose type implements [`Validatable`], so a schema
//! cannot point at a type without one.

pub(crate) mod bind;
pub mod builder;

use async_trait::async_trait;
use futures::FutureExt;

use crate::engine::config::ValidationConfig;
use crate::engine::{self, Traversal};
use crate::foundation::EngineError;
use crate::result::ValidationResult;
use crate::schema::bind::MemberPlan;

pub use builder::{ChainBuilder, MemberBuilder, SchemaBuilder};

/// Name of the chain registered by
/// [`MemberBuilder::chain`](builder::MemberBuilder::chain).
pub const DEFAULT_CHAIN: &str = "default";

/// The validation plan for one type: members in registration order, each
/// with its chains and optional nested binding.
///
/// Schemas are immutable once built and safe to share across threads.
pub struct Schema<T> {
    members: Vec<MemberPlan<T>>,
    has_async: bool,
}

impl<T: Send + Sync + 'static> Schema<T> {
    pub(crate) fn from_parts(members: Vec<MemberPlan<T>>, has_async: bool) -> Self {
        Self { members, has_async }
    }

    /// Starts building a schema for `T`.
    #[must_use]
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    pub(crate) fn members(&self) -> &[MemberPlan<T>] {
        &self.members
    }

    /// Whether this schema registered any async rule directly.
    ///
    /// Nested schemas are not inspected; the sync entrypoints detect nested
    /// async work when the traversal fails to complete eagerly.
    #[must_use]
    pub fn has_async(&self) -> bool {
        self.has_async
    }

    /// Validates an instance synchronously with default options.
    ///
    /// # Errors
    ///
    /// [`EngineError::AsyncSchema`] if this schema, or any schema reached
    /// through nesting, contains async rules; other variants per
    /// [`EngineError`].
    pub fn validate(&self, instance: &T) -> Result<ValidationResult, EngineError> {
        self.validate_with(instance, ValidationConfig::default())
    }

    /// Validates an instance synchronously with explicit options.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validate_with(
        &self,
        instance: &T,
        config: ValidationConfig,
    ) -> Result<ValidationResult, EngineError> {
        if self.has_async {
            return Err(EngineError::AsyncSchema);
        }
        let mut traversal = Traversal::new();
        // A schema with only sync rules never suspends, so the traversal
        // completes on its first poll. A pending future means a nested
        // schema smuggled in async work.
        match engine::run_schema(self, instance, &config, &mut traversal).now_or_never() {
            Some(run) => run,
            None => Err(EngineError::AsyncSchema),
        }
    }

    /// Validates an instance, awaiting async rules, with default options.
    ///
    /// # Errors
    ///
    /// See [`EngineError`]; `AsyncSchema` is never returned here.
    pub async fn validate_async(&self, instance: &T) -> Result<ValidationResult, EngineError> {
        self.validate_async_with(instance, ValidationConfig::default())
            .await
    }

    /// Validates an instance, awaiting async rules, with explicit options.
    ///
    /// # Errors
    ///
    /// See [`validate_async`](Self::validate_async).
    pub async fn validate_async_with(
        &self,
        instance: &T,
        config: ValidationConfig,
    ) -> Result<ValidationResult, EngineError> {
        let mut traversal = Traversal::new();
        engine::run_schema(self, instance, &config, &mut traversal).await
    }
}

/// A type with a registered schema.
///
/// The `&'static` return is the registration registry: one schema per type,
/// built on first use.
pub trait Validatable: Sized + Send + Sync + 'static {
    /// The schema validating this type.
    fn schema() -> &'static Schema<Self>;
}

/// Validation entrypoints on the instance itself.
///
/// Blanket-implemented for every [`Validatable`] type.
#[async_trait]
pub trait ValidatableExt: Validatable {
    /// Validates with default options. See [`Schema::validate`].
    ///
    /// # Errors
    ///
    /// See [`Schema::validate`].
    fn validate(&self) -> Result<ValidationResult, EngineError> {
        Self::schema().validate(self)
    }

    /// Validates with explicit options. See [`Schema::validate_with`].
    ///
    /// # Errors
    ///
    /// See [`Schema::validate_with`].
    fn validate_with(&self, config: ValidationConfig) -> Result<ValidationResult, EngineError> {
        Self::schema().validate_with(self, config)
    }

    /// Validates, awaiting async rules. See [`Schema::validate_async`].
    ///
    /// # Errors
    ///
    /// See [`Schema::validate_async`].
    async fn validate_async(&self) -> Result<ValidationResult, EngineError> {
        Self::schema().validate_async(self).await
    }

    /// Validates with options, awaiting async rules. See
    /// [`Schema::validate_async_with`].
    ///
    /// # Errors
    ///
    /// See [`Schema::validate_async_with`].
    async fn validate_async_with(
        &self,
        config: ValidationConfig,
    ) -> Result<ValidationResult, EngineError> {
        Self::schema().validate_async_with(self, config).await
    }
}

#[async_trait]
impl<T: Validatable> ValidatableExt for T {}
