//! Collection rules. All operate on slices, so they bind to `Vec<T>`,
//! arrays, and anything else the accessor can deref to `[T]`.

use std::marker::PhantomData;

use crate::foundation::{Rule, RuleCheck};

/// Fails on an empty collection.
pub struct HasElements<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> HasElements<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for HasElements<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> Rule for HasElements<T> {
    type Input = [T];

    fn code(&self) -> &'static str {
        "no_elements"
    }

    fn check(&self, member: &str, value: &[T]) -> RuleCheck {
        RuleCheck::from_condition(!value.is_empty(), || {
            RuleCheck::fail("The field {0} must contain at least one element.").with_arg(member)
        })
    }
}

/// Fails when the collection has fewer elements than the minimum.
pub struct MinCount<T> {
    min: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MinCount<T> {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            _marker: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static> Rule for MinCount<T> {
    type Input = [T];

    fn code(&self) -> &'static str {
        "min_count"
    }

    fn check(&self, member: &str, value: &[T]) -> RuleCheck {
        RuleCheck::from_condition(value.len() >= self.min, || {
            RuleCheck::fail("The field {0} must contain at least {1} elements.")
                .with_arg(member)
                .with_arg(self.min)
        })
    }
}

/// Fails when the collection has more elements than the maximum.
pub struct MaxCount<T> {
    max: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MaxCount<T> {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            _marker: PhantomData,
        }
    }
}

impl<T: Send + Sync + 'static> Rule for MaxCount<T> {
    type Input = [T];

    fn code(&self) -> &'static str {
        "max_count"
    }

    fn check(&self, member: &str, value: &[T]) -> RuleCheck {
        RuleCheck::from_condition(value.len() <= self.max, || {
            RuleCheck::fail("The field {0} must contain at most {1} elements.")
                .with_arg(member)
                .with_arg(self.max)
        })
    }
}

/// Fails when a collection of optional elements contains an absent one.
pub struct NoNullElements<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> NoNullElements<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for NoNullElements<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> Rule for NoNullElements<T> {
    type Input = [Option<T>];

    fn code(&self) -> &'static str {
        "null_elements"
    }

    fn check(&self, member: &str, value: &[Option<T>]) -> RuleCheck {
        match value.iter().position(Option::is_none) {
            None => RuleCheck::pass(),
            Some(index) => RuleCheck::fail("The field {0} must not contain null element {1}.")
                .with_arg(member)
                .with_arg(index),
        }
    }
}

// ===== Factory functions =====

/// Creates a [`HasElements`] rule.
#[must_use]
pub fn has_elements<T>() -> HasElements<T> {
    HasElements::new()
}

/// Creates a [`MinCount`] rule.
#[must_use]
pub fn min_count<T>(min: usize) -> MinCount<T> {
    MinCount::new(min)
}

/// Creates a [`MaxCount`] rule.
#[must_use]
pub fn max_count<T>(max: usize) -> MaxCount<T> {
    MaxCount::new(max)
}

/// Creates a [`NoNullElements`] rule.
#[must_use]
pub fn no_null_elements<T>() -> NoNullElements<T> {
    NoNullElements::new()
}
