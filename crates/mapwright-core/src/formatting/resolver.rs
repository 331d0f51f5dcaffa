//! Formatter chain resolution
//!
//! Computes, for a source runtime type and a destination member, the ordered
//! list of formatters to apply:
//!
//! 1. the chain registered for the source type, in registration order
//! 2. the global chain, in registration order
//! 3. minus every by-type entry skipped for the source type
//! 4. minus every by-type entry skipped for the destination member
//! 5. plus the member-added formatters, in call order, never filtered
//!
//! Duplicates are kept. An empty chain is not an error.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::member::MemberFormatterConfig;
use super::registry::FormatterRegistry;
use super::types::FormatterEntry;
use crate::types::{DestinationMember, TypeKey};
use std::collections::HashMap;

/// Materialized formatter chain for one destination member
#[derive(Debug, Clone, Default)]
pub struct ResolvedChain<'a> {
    entries: Vec<&'a FormatterEntry>,
    null_value: Option<&'a str>,
}

impl<'a> ResolvedChain<'a> {
    /// Formatters in application order
    pub fn entries(&self) -> &[&'a FormatterEntry] {
        &self.entries
    }

    /// Null-substitution literal of the destination member
    pub fn null_value(&self) -> Option<&'a str> {
        self.null_value
    }

    /// Number of formatters in the chain
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no formatter applies
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formatter names in application order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }
}

/// Read-only view over the registry and member configurations
#[derive(Debug, Clone, Copy)]
pub struct FormatterResolver<'a> {
    registry: &'a FormatterRegistry,
    members: &'a HashMap<DestinationMember, MemberFormatterConfig>,
}

impl<'a> FormatterResolver<'a> {
    /// Create a resolver over the given configuration
    pub fn new(
        registry: &'a FormatterRegistry,
        members: &'a HashMap<DestinationMember, MemberFormatterConfig>,
    ) -> Self {
        Self { registry, members }
    }

    /// Resolve the chain for `source_type` flowing into `destination`
    pub fn resolve(&self, source_type: &TypeKey, destination: &DestinationMember) -> ResolvedChain<'a> {
        let registry = self.registry;
        let member = self.members.get(destination);

        let mut entries: Vec<&'a FormatterEntry> = registry
            .type_chain(source_type)
            .iter()
            .chain(registry.global_chain())
            .filter(|entry| match entry.formatter.formatter_type() {
                Some(formatter_type) => {
                    !registry.is_skipped(source_type, &formatter_type)
                        && !member.is_some_and(|m| m.is_skipped(&formatter_type))
                }
                None => true,
            })
            .collect();

        if let Some(member) = member {
            entries.extend(member.added());
        }

        log::debug!(
            "Resolved {} formatter(s) for {} (source type {})",
            entries.len(),
            destination,
            source_type.short_name()
        );

        ResolvedChain {
            entries,
            null_value: member.and_then(MemberFormatterConfig::null_value),
        }
    }
}
