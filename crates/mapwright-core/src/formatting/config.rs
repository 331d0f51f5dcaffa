//! Owned formatting configuration
//!
//! [`FormattingConfig`] bundles the registry, the member configurations and
//! the instance provider into one value. It is mutated through `&mut self`
//! while mappings are configured and only read at map time, so a configured
//! value can be shared across threads behind an `Arc`.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::member::MemberFormatterConfig;
use super::pipeline::FormattingPipeline;
use super::provider::InstanceProvider;
use super::registry::{FormatterRegistry, TypeRegistration};
use super::resolver::{FormatterResolver, ResolvedChain};
use super::summary::ConfigSummary;
use super::types::{FormatterEntry, FormatterRef, FormatterType, ResolutionContext, SharedFormatter, ValueFormatter};
use crate::types::{DestinationMember, SourceValue, TypeKey};
use crate::Result;
use std::collections::HashMap;

/// Complete formatter configuration of a mapping setup
#[derive(Debug, Clone, Default)]
pub struct FormattingConfig {
    registry: FormatterRegistry,
    members: HashMap<DestinationMember, MemberFormatterConfig>,
    provider: InstanceProvider,
}

impl FormattingConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Global and per-source-type registrations
    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    /// Mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }

    /// Append a `Default`-constructible formatter type to the global chain
    pub fn add_global_formatter<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + Default + 'static,
    {
        self.registry.add_global_formatter::<F>()
    }

    /// Append a formatter type without a parameterless constructor to the
    /// global chain
    pub fn add_global_formatter_type<F>(&mut self) -> TypeRegistration<'_, F>
    where
        F: ValueFormatter + 'static,
    {
        self.registry.add_global_formatter_type::<F>()
    }

    /// Append a formatter instance or expression to the global chain
    pub fn add_global(&mut self, formatter: impl Into<FormatterRef>) -> &mut FormatterEntry {
        self.registry.add_global(formatter)
    }

    /// Append a `Default`-constructible formatter type for source type `T`
    pub fn add_formatter_for_source_type<T, F>(&mut self) -> TypeRegistration<'_, F>
    where
        T: ?Sized + 'static,
        F: ValueFormatter + Default + 'static,
    {
        self.registry.add_formatter_for_source_type::<T, F>()
    }

    /// Skip formatter type `F` for source type `T`
    pub fn skip_formatter_for_source_type<T, F>(&mut self) -> &mut Self
    where
        T: ?Sized + 'static,
        F: ValueFormatter + 'static,
    {
        self.registry.skip_formatter_for_source_type::<T, F>();
        self
    }

    /// Configuration of `destination`, created on first access
    pub fn member(&mut self, destination: DestinationMember) -> &mut MemberFormatterConfig {
        self.members.entry(destination).or_default()
    }

    /// Configuration of member `name` in the mapping from `S` to `D`
    pub fn member_of<S: 'static, D: 'static>(&mut self, name: impl Into<String>) -> &mut MemberFormatterConfig {
        self.member(DestinationMember::of::<S, D>(name))
    }

    /// Configuration of `destination`, if any was made
    pub fn member_config(&self, destination: &DestinationMember) -> Option<&MemberFormatterConfig> {
        self.members.get(destination)
    }

    /// All configured members
    pub fn members(&self) -> &HashMap<DestinationMember, MemberFormatterConfig> {
        &self.members
    }

    /// Instance provider used for by-type formatters
    pub fn instance_provider(&self) -> &InstanceProvider {
        &self.provider
    }

    /// Route every by-type construction lacking a per-entry override through
    /// `factory`
    pub fn set_global_instance_provider<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(&FormatterType) -> Option<SharedFormatter> + Send + Sync + 'static,
    {
        self.provider.set_factory(factory);
        self
    }

    /// Resolve the chain applied when a value of `source_type` flows into
    /// `destination`
    pub fn resolve(&self, source_type: &TypeKey, destination: &DestinationMember) -> ResolvedChain<'_> {
        FormatterResolver::new(&self.registry, &self.members).resolve(source_type, destination)
    }

    /// Names of the formatters [`resolve`](Self::resolve) would apply
    pub fn resolve_chain_names(&self, source_type: &TypeKey, destination: &DestinationMember) -> Vec<String> {
        self.resolve(source_type, destination).names()
    }

    /// Resolve and run the formatter chain for one destination member
    ///
    /// `source_type` is the runtime type of the source value; the traversal
    /// engine passes it explicitly so null values resolve too.
    pub fn resolve_and_apply(
        &self,
        value: Option<&dyn SourceValue>,
        source_member: &str,
        source_type: TypeKey,
        destination: &DestinationMember,
    ) -> Result<Option<String>> {
        let chain = self.resolve(&source_type, destination);
        let context = ResolutionContext::new(value, source_member, source_type, destination);
        FormattingPipeline::new(&self.provider).apply(&chain, &context)
    }

    /// Format a non-null value, taking the source type from the value itself
    pub fn format_value(
        &self,
        value: &dyn SourceValue,
        source_member: &str,
        destination: &DestinationMember,
    ) -> Result<String> {
        let formatted = self.resolve_and_apply(Some(value), source_member, value.type_key(), destination)?;
        Ok(formatted.unwrap_or_default())
    }

    /// Serializable description of every registration
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary::from_config(self)
    }

    /// Whether nothing has been configured
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty() && self.members.is_empty() && !self.provider.has_factory()
    }

    /// Clear every registration, skip set, member override and the global
    /// instance factory
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
