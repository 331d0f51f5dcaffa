//! Formatting pipeline implementation
//!
//! Runs a resolved chain against one value. Null substitution is checked
//! first; otherwise each formatter receives the previous formatter's output
//! as its value. By-type formatters are instantiated on each run, instances
//! are reused as registered.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::provider::InstanceProvider;
use super::resolver::ResolvedChain;
use super::types::{FormatterEntry, FormatterRef, ResolutionContext};
use crate::Result;

/// Executes resolved formatter chains
#[derive(Debug, Clone, Copy)]
pub struct FormattingPipeline<'a> {
    provider: &'a InstanceProvider,
}

impl<'a> FormattingPipeline<'a> {
    /// Create a pipeline constructing by-type formatters through `provider`
    pub fn new(provider: &'a InstanceProvider) -> Self {
        Self { provider }
    }

    /// Apply `chain` to the value carried by `context`
    ///
    /// Returns the destination member's value: the null-substitution literal,
    /// the chain's final output, or the value's default string conversion when
    /// the chain is empty. `None` only for a null value with an empty chain
    /// and no substitution.
    ///
    /// # Errors
    ///
    /// Formatter errors are returned unmodified and abort the chain.
    pub fn apply(&self, chain: &ResolvedChain<'_>, context: &ResolutionContext<'_>) -> Result<Option<String>> {
        if context.is_null() {
            if let Some(literal) = chain.null_value() {
                return Ok(Some(literal.to_string()));
            }
        }

        let mut entries = chain.entries().iter();
        let Some(first) = entries.next() else {
            return Ok(context.value().map(|value| value.to_string()));
        };

        let mut running = self.invoke(first, context)?;
        for entry in entries {
            let next = self.invoke(entry, &context.with_value(&running))?;
            running = next;
        }

        Ok(Some(running))
    }

    fn invoke(&self, entry: &FormatterEntry, context: &ResolutionContext<'_>) -> Result<String> {
        log::trace!("Applying formatter {} to {}", entry.name(), context.destination());

        match &entry.formatter {
            FormatterRef::ByType {
                formatter_type,
                construct,
            } => self
                .provider
                .resolve(formatter_type, construct.as_ref())?
                .format(context),
            FormatterRef::ByInstance(formatter) => formatter.format(context),
            FormatterRef::ByExpression { expression, .. } => expression(context),
        }
    }
}
