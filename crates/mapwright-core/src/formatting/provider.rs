//! Formatter instance construction
//!
//! By-type formatters are built at first use per invocation. Construction
//! follows a fixed precedence: the entry's own construction override, then the
//! global factory, then the type's zero-argument constructor.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::types::{ConstructionOverride, FormatterType, SharedFormatter};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Global factory from a requested formatter type to an instance
///
/// Returning `None` declines the type and falls through to its default
/// constructor.
pub type InstanceFactory = Arc<dyn Fn(&FormatterType) -> Option<SharedFormatter> + Send + Sync>;

/// Strategy that turns formatter type references into instances
#[derive(Clone, Default)]
pub struct InstanceProvider {
    factory: Option<InstanceFactory>,
}

impl InstanceProvider {
    /// Provider using zero-argument construction only
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider consulting `factory` before default construction
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&FormatterType) -> Option<SharedFormatter> + Send + Sync + 'static,
    {
        Self {
            factory: Some(Arc::new(factory)),
        }
    }

    /// Install a global factory, replacing any previous one
    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: Fn(&FormatterType) -> Option<SharedFormatter> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
    }

    /// Revert to zero-argument construction
    pub fn clear_factory(&mut self) {
        self.factory = None;
    }

    /// Whether a global factory is installed
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Build an instance of `formatter_type`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no override is attached, the
    /// global factory declines, and the type has no zero-argument constructor.
    pub fn resolve(
        &self,
        formatter_type: &FormatterType,
        construct: Option<&ConstructionOverride>,
    ) -> Result<SharedFormatter> {
        if let Some(construct) = construct {
            return Ok(construct());
        }

        if let Some(factory) = &self.factory {
            if let Some(instance) = factory(formatter_type) {
                return Ok(instance);
            }
            log::debug!(
                "Global instance factory declined {}, using its default constructor",
                formatter_type.name()
            );
        }

        formatter_type.construct_default().ok_or_else(|| {
            Error::configuration(
                formatter_type.key().name(),
                "no parameterless constructor and no construction override supplied",
            )
        })
    }
}

impl fmt::Debug for InstanceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceProvider")
            .field("has_factory", &self.has_factory())
            .finish()
    }
}
