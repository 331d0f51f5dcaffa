//! Per-destination-member formatter configuration
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::registry::TypeRegistration;
use super::types::{FormatterEntry, FormatterRef, FormatterType, ValueFormatter};
use crate::types::TypeKey;
use std::collections::HashSet;

/// Overrides attached to one destination member of one type mapping
///
/// Member-added formatters run after the inherited chain and are never
/// removed by skips. Skips only filter the inherited global and
/// type-specific chain.
#[derive(Debug, Clone, Default)]
pub struct MemberFormatterConfig {
    added: Vec<FormatterEntry>,
    skipped: HashSet<TypeKey>,
    null_value: Option<String>,
}

impl MemberFormatterConfig {
    /// Create an empty member configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `Default`-constructible formatter type for this member
    pub fn add_formatter<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + Default + 'static,
    {
        TypeRegistration::new(self.push(FormatterRef::by_type::<F>()))
    }

    /// Append a formatter type without a parameterless constructor for this
    /// member
    pub fn add_formatter_type<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + 'static,
    {
        TypeRegistration::new(self.push(FormatterRef::of_type(FormatterType::of::<F>())))
    }

    /// Append any formatter reference for this member
    pub fn add(&mut self, formatter: impl Into<FormatterRef>) -> &mut Self {
        self.push(formatter.into());
        self
    }

    /// Remove formatter type `F` from the inherited chain for this member
    pub fn skip_formatter<F: ValueFormatter + 'static>(&mut self) -> &mut Self {
        self.skip(TypeKey::of::<F>())
    }

    /// Remove `formatter_type` from the inherited chain for this member
    pub fn skip(&mut self, formatter_type: TypeKey) -> &mut Self {
        self.skipped.insert(formatter_type);
        self
    }

    /// Assign `literal` verbatim whenever the source value is null
    pub fn format_null_value_as(&mut self, literal: impl Into<String>) -> &mut Self {
        self.null_value = Some(literal.into());
        self
    }

    /// Member-added formatters in call order
    pub fn added(&self) -> &[FormatterEntry] {
        &self.added
    }

    /// Skipped formatter types
    pub fn skipped(&self) -> &HashSet<TypeKey> {
        &self.skipped
    }

    /// Whether `formatter_type` is skipped for this member
    pub fn is_skipped(&self, formatter_type: &TypeKey) -> bool {
        self.skipped.contains(formatter_type)
    }

    /// Null-substitution literal, if configured
    pub fn null_value(&self) -> Option<&str> {
        self.null_value.as_deref()
    }

    fn push(&mut self, formatter: FormatterRef) -> &mut FormatterEntry {
        self.added.push(FormatterEntry::new(formatter));
        let last = self.added.len() - 1;
        &mut self.added[last]
    }
}
