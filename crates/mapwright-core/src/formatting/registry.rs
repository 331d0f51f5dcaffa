//! Formatter registry
//!
//! Stores the global formatter chain, the per-source-type chains and the
//! per-source-type skip sets. All chains are append-only; the only way to
//! remove registrations is [`FormatterRegistry::reset`].
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::types::{FormatterEntry, FormatterRef, FormatterType, SharedFormatter, ValueFormatter};
use crate::types::TypeKey;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

/// Handle returned by by-type registrations
///
/// Allows a follow-up [`constructed_by`](TypeRegistration::constructed_by)
/// scoped to the one entry just registered.
pub struct TypeRegistration<'a, F> {
    entry: &'a mut FormatterEntry,
    _formatter: PhantomData<fn() -> F>,
}

impl<'a, F: ValueFormatter + 'static> TypeRegistration<'a, F> {
    pub(crate) fn new(entry: &'a mut FormatterEntry) -> Self {
        Self {
            entry,
            _formatter: PhantomData,
        }
    }

    /// Build this entry's formatter with `factory` instead of the instance
    /// provider
    pub fn constructed_by<C>(self, factory: C) -> &'a mut FormatterEntry
    where
        C: Fn() -> F + Send + Sync + 'static,
    {
        if let FormatterRef::ByType { construct, .. } = &mut self.entry.formatter {
            *construct = Some(Arc::new(move || Arc::new(factory()) as SharedFormatter));
        }
        self.entry
    }

    /// Sequence number of the registration
    pub fn sequence(&self) -> u64 {
        self.entry.sequence
    }
}

/// Store of global and per-source-type formatter configuration
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    global: Vec<FormatterEntry>,
    by_source_type: HashMap<TypeKey, Vec<FormatterEntry>>,
    skipped: HashMap<TypeKey, HashSet<TypeKey>>,
}

impl FormatterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `Default`-constructible formatter type to the global chain
    pub fn add_global_formatter<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + Default + 'static,
    {
        TypeRegistration::new(Self::push(&mut self.global, FormatterRef::by_type::<F>()))
    }

    /// Append a formatter type without a parameterless constructor to the
    /// global chain
    ///
    /// The entry needs [`TypeRegistration::constructed_by`] or a global
    /// instance factory, otherwise it fails at first use.
    pub fn add_global_formatter_type<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + 'static,
    {
        TypeRegistration::new(Self::push(
            &mut self.global,
            FormatterRef::of_type(FormatterType::of::<F>()),
        ))
    }

    /// Append any formatter reference to the global chain
    pub fn add_global(&mut self, formatter: impl Into<FormatterRef>) -> &mut FormatterEntry {
        Self::push(&mut self.global, formatter.into())
    }

    /// Append a `Default`-constructible formatter type to the chain of
    /// source type `T`
    pub fn add_formatter_for_source_type<T, F>(&mut self) -> TypeRegistration<'_, F>
    where
        T: ?Sized + 'static,
        F: ValueFormatter + Default + 'static,
    {
        let chain = self.by_source_type.entry(TypeKey::of::<T>()).or_default();
        TypeRegistration::new(Self::push(chain, FormatterRef::by_type::<F>()))
    }

    /// Append a formatter type without a parameterless constructor to the
    /// chain of source type `T`
    pub fn add_formatter_type_for_source_type<T, F>(&mut self) -> TypeRegistration<'_, F>
    where
        T: ?Sized + 'static,
        F: ValueFormatter + 'static,
    {
        let chain = self.by_source_type.entry(TypeKey::of::<T>()).or_default();
        TypeRegistration::new(Self::push(chain, FormatterRef::of_type(FormatterType::of::<F>())))
    }

    /// Append any formatter reference to the chain of `source_type`
    pub fn add_for_source_type(
        &mut self,
        source_type: TypeKey,
        formatter: impl Into<FormatterRef>,
    ) -> &mut FormatterEntry {
        let chain = self.by_source_type.entry(source_type).or_default();
        Self::push(chain, formatter.into())
    }

    /// Exclude formatter type `F` from every chain resolved for source type `T`
    pub fn skip_formatter_for_source_type<T, F>(&mut self) -> &mut Self
    where
        T: ?Sized + 'static,
        F: ValueFormatter + 'static,
    {
        self.skip_for_source_type(TypeKey::of::<T>(), TypeKey::of::<F>())
    }

    /// Exclude `formatter_type` from every chain resolved for `source_type`
    pub fn skip_for_source_type(&mut self, source_type: TypeKey, formatter_type: TypeKey) -> &mut Self {
        self.skipped.entry(source_type).or_default().insert(formatter_type);
        self
    }

    /// Global chain in registration order
    pub fn global_chain(&self) -> &[FormatterEntry] {
        &self.global
    }

    /// Chain registered for `source_type`, empty when none
    pub fn type_chain(&self, source_type: &TypeKey) -> &[FormatterEntry] {
        self.by_source_type
            .get(source_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Skip set registered for `source_type`
    pub fn type_skips(&self, source_type: &TypeKey) -> Option<&HashSet<TypeKey>> {
        self.skipped.get(source_type)
    }

    /// Whether `formatter_type` is skipped for `source_type`
    pub fn is_skipped(&self, source_type: &TypeKey, formatter_type: &TypeKey) -> bool {
        self.skipped
            .get(source_type)
            .is_some_and(|set| set.contains(formatter_type))
    }

    /// Source types with a registered chain or skip set
    pub fn configured_source_types(&self) -> impl Iterator<Item = &TypeKey> {
        let mut seen = HashSet::new();
        self.by_source_type
            .keys()
            .chain(self.skipped.keys())
            .filter(move |key| seen.insert(**key))
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.by_source_type.is_empty() && self.skipped.is_empty()
    }

    /// Drop every chain and skip set
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn push(chain: &mut Vec<FormatterEntry>, formatter: FormatterRef) -> &mut FormatterEntry {
        chain.push(FormatterEntry::new(formatter));
        let last = chain.len() - 1;
        &mut chain[last]
    }
}
