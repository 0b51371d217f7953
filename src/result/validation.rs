//! The root of the result tree and the flattened error report.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::foundation::{DefaultFormatter, Formatter};
use crate::result::property::{NestedResults, PropertyResult};

/// The complete result of validating one object.
///
/// The tree mirrors the schema: one [`PropertyResult`] per validated member,
/// in registration order, each holding its chains and any nested tree. The
/// tree is immutable once returned; every accessor, including message
/// formatting, is read-only.
#[derive(Clone, Serialize)]
pub struct ValidationResult {
    properties: IndexMap<Cow<'static, str>, PropertyResult>,
    #[serde(skip)]
    formatter: Option<Arc<dyn Formatter>>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            properties: IndexMap::new(),
            formatter: None,
        }
    }

    pub(crate) fn insert(&mut self, property: PropertyResult) {
        self.properties
            .insert(Cow::Owned(property.member().to_string()), property);
    }

    pub(crate) fn set_formatter(&mut self, formatter: Option<Arc<dyn Formatter>>) {
        self.formatter = formatter;
    }

    /// True when no failure was recorded anywhere in the tree.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// True when any member, at any depth, recorded a failure.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.properties.values().any(PropertyResult::has_errors)
    }

    /// Total failing outcomes across the whole tree.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.properties.values().map(PropertyResult::errors_count).sum()
    }

    /// The result recorded for a top-level member.
    #[must_use]
    pub fn property(&self, member: &str) -> Option<&PropertyResult> {
        self.properties.get(member)
    }

    /// All member results, in schema registration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyResult> {
        self.properties.values()
    }

    /// Whether the member at a dotted path recorded a failure.
    ///
    /// Numeric segments index into collection members, matching the paths
    /// produced by [`errors`](Self::errors):
    ///
    /// ```rust,ignore
    /// result.has_errors_at(&["Addresses", "0", "Street"]);
    /// ```
    ///
    /// Returns `false` for paths the tree does not contain.
    #[must_use]
    pub fn has_errors_at(&self, path: &[&str]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return self.has_errors();
        };
        let Some(property) = self.property(first) else {
            return false;
        };
        if rest.is_empty() {
            return property.has_errors();
        }
        match property.nested() {
            NestedResults::None => false,
            NestedResults::Single(result) => result.has_errors_at(rest),
            NestedResults::Collection(results) => {
                let Some((index_segment, tail)) = rest.split_first() else {
                    return false;
                };
                let Ok(index) = index_segment.parse::<usize>() else {
                    return false;
                };
                results
                    .iter()
                    .find(|(i, _)| *i == index)
                    .is_some_and(|(_, r)| r.has_errors_at(tail))
            }
        }
    }

    /// Flattens every failure into path-addressed records, formatted with
    /// the formatter the validate call was configured with (or the default).
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorRecord> {
        match &self.formatter {
            Some(formatter) => self.errors_with(formatter.as_ref()),
            None => self.errors_with(&DefaultFormatter),
        }
    }

    /// Flattens every failure, formatted with a caller-supplied formatter.
    ///
    /// The tree is never mutated: the same result can be rendered with any
    /// number of formatters.
    #[must_use]
    pub fn errors_with(&self, formatter: &dyn Formatter) -> Vec<ErrorRecord> {
        let mut records = Vec::new();
        self.collect_errors(&mut Vec::new(), formatter, &mut records);
        records
    }

    fn collect_errors(
        &self,
        prefix: &mut Vec<String>,
        formatter: &dyn Formatter,
        records: &mut Vec<ErrorRecord>,
    ) {
        for property in self.properties.values() {
            prefix.push(property.member().to_string());
            for chain in property.chains() {
                for outcome in chain.failures() {
                    records.push(ErrorRecord {
                        path: prefix.clone(),
                        chain: chain.chain().to_string(),
                        code: outcome.code().to_string(),
                        rule: outcome.rule().to_string(),
                        message: outcome.format_with(formatter),
                    });
                }
            }
            match property.nested() {
                NestedResults::None => {}
                NestedResults::Single(result) => {
                    result.collect_errors(prefix, formatter, records);
                }
                NestedResults::Collection(results) => {
                    for (index, result) in results {
                        prefix.push(index.to_string());
                        result.collect_errors(prefix, formatter, records);
                        prefix.pop();
                    }
                }
            }
            prefix.pop();
        }
    }
}

impl fmt::Debug for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("properties", &self.properties)
            .field("has_formatter", &self.formatter.is_some())
            .finish()
    }
}

/// One failure, flattened out of the tree with its full dotted path.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    /// Member path from the root, with collection indices as segments
    /// (`["Addresses", "0", "Street"]`).
    pub path: Vec<String>,
    /// The chain that recorded the failure.
    pub chain: String,
    /// The failing rule's stable error code.
    pub code: String,
    /// The failing rule's name.
    pub rule: String,
    /// The formatted message.
    pub message: String,
}

impl ErrorRecord {
    /// The path as a single dotted string (`"Addresses.0.Street"`).
    #[must_use]
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}
