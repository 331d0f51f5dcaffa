//! Serializable description of a formatting configuration
//!
//! Used for diagnostics: dumping what was registered where, in which order.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::config::FormattingConfig;
use super::types::{FormatterEntry, FormatterKind};
use crate::types::TypeKey;
use crate::Result;
use serde::Serialize;

/// One registered formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterSummary {
    pub name: String,
    pub kind: FormatterKind,
    pub sequence: u64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub constructed_by: bool,
}

impl From<&FormatterEntry> for FormatterSummary {
    fn from(entry: &FormatterEntry) -> Self {
        Self {
            name: entry.name().to_string(),
            kind: entry.formatter.kind(),
            sequence: entry.sequence,
            constructed_by: entry.formatter.has_construction_override(),
        }
    }
}

/// Registrations for one source type
#[derive(Debug, Clone, Serialize)]
pub struct SourceTypeSummary {
    pub source_type: TypeKey,
    pub formatters: Vec<FormatterSummary>,
    pub skipped: Vec<String>,
}

/// Overrides for one destination member
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub member: String,
    pub added: Vec<FormatterSummary>,
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,
}

/// Whole-configuration report
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub global: Vec<FormatterSummary>,
    pub source_types: Vec<SourceTypeSummary>,
    pub members: Vec<MemberSummary>,
    pub global_instance_provider: bool,
}

impl ConfigSummary {
    /// Build the report for `config`; sections are sorted by name
    pub fn from_config(config: &FormattingConfig) -> Self {
        let registry = config.registry();

        let mut source_types: Vec<SourceTypeSummary> = registry
            .configured_source_types()
            .map(|source_type| SourceTypeSummary {
                source_type: *source_type,
                formatters: registry.type_chain(source_type).iter().map(Into::into).collect(),
                skipped: sorted_names(registry.type_skips(source_type).into_iter().flatten()),
            })
            .collect();
        source_types.sort_by(|a, b| a.source_type.name().cmp(b.source_type.name()));

        let mut members: Vec<MemberSummary> = config
            .members()
            .iter()
            .map(|(destination, member)| MemberSummary {
                member: destination.to_string(),
                added: member.added().iter().map(Into::into).collect(),
                skipped: sorted_names(member.skipped()),
                null_value: member.null_value().map(str::to_string),
            })
            .collect();
        members.sort_by(|a, b| a.member.cmp(&b.member));

        Self {
            global: registry.global_chain().iter().map(Into::into).collect(),
            source_types,
            members,
            global_instance_provider: config.instance_provider().has_factory(),
        }
    }

    /// Pretty-printed JSON rendering
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of registered formatters
    pub fn formatter_count(&self) -> usize {
        self.global.len()
            + self.source_types.iter().map(|s| s.formatters.len()).sum::<usize>()
            + self.members.iter().map(|m| m.added.len()).sum::<usize>()
    }
}

fn sorted_names<'a>(keys: impl IntoIterator<Item = &'a TypeKey>) -> Vec<String> {
    let mut names: Vec<String> = keys.into_iter().map(|k| k.short_name().to_string()).collect();
    names.sort();
    names
}
