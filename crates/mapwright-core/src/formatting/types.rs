//! Core types for the value formatting system
//!
//! This module defines the formatter trait, the per-invocation resolution
//! context, and the registration records that the registry and member
//! configurations store.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use crate::types::{short_type_name, DestinationMember, SourceValue, TypeKey};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A unit of transformation from a value and its context to a string
///
/// Instances registered directly are shared by every invocation, possibly
/// from several threads at once, so `format` must not mutate persistent state.
pub trait ValueFormatter: Send + Sync {
    /// Format the context's current value
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String>;

    /// Name used in diagnostics and error messages
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Formatter handle shared between registrations and invocations
pub type SharedFormatter = Arc<dyn ValueFormatter>;

/// Per-registration factory overriding how a by-type formatter is built
pub type ConstructionOverride = Arc<dyn Fn() -> SharedFormatter + Send + Sync>;

/// Inline formatting function
pub type ExpressionFn = Arc<dyn Fn(&ResolutionContext<'_>) -> Result<String> + Send + Sync>;

/// Immutable per-invocation view handed to each formatter
///
/// `value` is the running value: the source member's value for the first
/// formatter of a chain, the previous formatter's output afterwards.
/// `source_type` always names the runtime type the chain was resolved for.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    value: Option<&'a dyn SourceValue>,
    source_member: &'a str,
    source_type: TypeKey,
    destination: &'a DestinationMember,
}

impl<'a> ResolutionContext<'a> {
    /// Create a context for one destination member
    pub fn new(
        value: Option<&'a dyn SourceValue>,
        source_member: &'a str,
        source_type: TypeKey,
        destination: &'a DestinationMember,
    ) -> Self {
        Self {
            value,
            source_member,
            source_type,
            destination,
        }
    }

    /// Same context, carrying a different running value
    pub fn with_value<'b>(&self, value: &'b dyn SourceValue) -> ResolutionContext<'b>
    where
        'a: 'b,
    {
        ResolutionContext {
            value: Some(value),
            source_member: self.source_member,
            source_type: self.source_type,
            destination: self.destination,
        }
    }

    /// The running value, `None` when the source value is null
    pub fn value(&self) -> Option<&'a dyn SourceValue> {
        self.value
    }

    /// Name of the source member the value was read from
    pub fn source_member(&self) -> &'a str {
        self.source_member
    }

    /// Runtime type the formatter chain was resolved for
    pub fn source_type(&self) -> TypeKey {
        self.source_type
    }

    /// Destination member being assigned
    pub fn destination(&self) -> &'a DestinationMember {
        self.destination
    }

    /// Whether the running value is null
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Runtime type of the running value, if any
    pub fn value_type(&self) -> Option<TypeKey> {
        self.value.map(|v| v.type_key())
    }

    /// The running value downcast to `T`
    pub fn value_as<T: 'static>(&self) -> Option<&'a T> {
        self.value.and_then(|v| v.as_any().downcast_ref::<T>())
    }

    /// The running value downcast to `T`, or an invalid-operation error
    /// attributed to `formatter`
    pub fn require<T: 'static>(&self, formatter: &str) -> Result<&'a T> {
        self.value_as::<T>().ok_or_else(|| {
            let found = self
                .value_type()
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| "null".to_string());
            Error::invalid_operation(
                formatter,
                format!("expected a value of type {}", std::any::type_name::<T>()),
                found,
            )
        })
    }

    /// Default string conversion of the running value; empty for null
    pub fn value_string(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_default()
    }
}

fn construct_default<F: ValueFormatter + Default + 'static>() -> SharedFormatter {
    Arc::new(F::default())
}

/// Reference to a formatter type, instantiated lazily
///
/// Carries the zero-argument constructor when the type has one. Types built
/// with [`FormatterType::of`] have none and need a construction override or a
/// global instance provider.
#[derive(Clone)]
pub struct FormatterType {
    key: TypeKey,
    constructor: Option<fn() -> SharedFormatter>,
}

impl FormatterType {
    /// Type reference for `F` constructed through `F::default()`
    pub fn constructible<F: ValueFormatter + Default + 'static>() -> Self {
        Self {
            key: TypeKey::of::<F>(),
            constructor: Some(construct_default::<F>),
        }
    }

    /// Type reference for `F` without a parameterless constructor
    pub fn of<F: ValueFormatter + 'static>() -> Self {
        Self {
            key: TypeKey::of::<F>(),
            constructor: None,
        }
    }

    /// Identity of the formatter type
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Short name of the formatter type
    pub fn name(&self) -> &'static str {
        self.key.short_name()
    }

    /// Whether the type has a zero-argument constructor
    pub fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Invoke the zero-argument constructor, if any
    pub fn construct_default(&self) -> Option<SharedFormatter> {
        self.constructor.map(|construct| construct())
    }
}

impl fmt::Debug for FormatterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterType")
            .field("key", &self.key)
            .field("has_default_constructor", &self.has_default_constructor())
            .finish()
    }
}

/// How a formatter was registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    /// Type reference instantiated at first use
    Type,
    /// Concrete instance reused by every invocation
    Instance,
    /// Inline function
    Expression,
}

/// A formatter as registered: by type, by instance, or as an expression
///
/// Only [`FormatterRef::ByType`] takes part in skip-by-type matching.
#[derive(Clone)]
pub enum FormatterRef {
    /// Type reference, with an optional construction override for this entry
    ByType {
        formatter_type: FormatterType,
        construct: Option<ConstructionOverride>,
    },
    /// Shared concrete instance
    ByInstance(SharedFormatter),
    /// Anonymous inline formatter
    ByExpression { name: String, expression: ExpressionFn },
}

impl FormatterRef {
    /// Type reference for a `Default`-constructible formatter
    pub fn by_type<F: ValueFormatter + Default + 'static>() -> Self {
        Self::ByType {
            formatter_type: FormatterType::constructible::<F>(),
            construct: None,
        }
    }

    /// Type reference from an explicit [`FormatterType`]
    pub fn of_type(formatter_type: FormatterType) -> Self {
        Self::ByType {
            formatter_type,
            construct: None,
        }
    }

    /// Concrete instance
    pub fn instance<F: ValueFormatter + 'static>(formatter: F) -> Self {
        Self::ByInstance(Arc::new(formatter))
    }

    /// Already shared instance
    pub fn shared(formatter: SharedFormatter) -> Self {
        Self::ByInstance(formatter)
    }

    /// Anonymous inline formatter
    pub fn expression<E>(expression: E) -> Self
    where
        E: Fn(&ResolutionContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Self::named_expression("expression", expression)
    }

    /// Inline formatter with a diagnostic name
    pub fn named_expression<E>(name: impl Into<String>, expression: E) -> Self
    where
        E: Fn(&ResolutionContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        Self::ByExpression {
            name: name.into(),
            expression: Arc::new(expression),
        }
    }

    /// Registration kind
    pub fn kind(&self) -> FormatterKind {
        match self {
            Self::ByType { .. } => FormatterKind::Type,
            Self::ByInstance(_) => FormatterKind::Instance,
            Self::ByExpression { .. } => FormatterKind::Expression,
        }
    }

    /// Name used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            Self::ByType { formatter_type, .. } => formatter_type.name(),
            Self::ByInstance(formatter) => formatter.name(),
            Self::ByExpression { name, .. } => name,
        }
    }

    /// Declared formatter type, for by-type registrations only
    pub fn formatter_type(&self) -> Option<TypeKey> {
        match self {
            Self::ByType { formatter_type, .. } => Some(formatter_type.key()),
            _ => None,
        }
    }

    /// Whether a skip of `skipped` removes this registration
    pub fn matches_skip(&self, skipped: &TypeKey) -> bool {
        self.formatter_type().is_some_and(|key| key == *skipped)
    }

    /// Whether a construction override is attached
    pub fn has_construction_override(&self) -> bool {
        matches!(self, Self::ByType { construct: Some(_), .. })
    }
}

impl fmt::Debug for FormatterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByType {
                formatter_type,
                construct,
            } => f
                .debug_struct("ByType")
                .field("formatter_type", formatter_type)
                .field("constructed_by", &construct.is_some())
                .finish(),
            Self::ByInstance(formatter) => f.debug_tuple("ByInstance").field(&formatter.name()).finish(),
            Self::ByExpression { name, .. } => f.debug_struct("ByExpression").field("name", name).finish(),
        }
    }
}

impl<F: ValueFormatter + 'static> From<Arc<F>> for FormatterRef {
    fn from(formatter: Arc<F>) -> Self {
        Self::ByInstance(formatter)
    }
}

impl From<FormatterType> for FormatterRef {
    fn from(formatter_type: FormatterType) -> Self {
        Self::of_type(formatter_type)
    }
}

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Next registration sequence number, unique for the process lifetime
pub(crate) fn next_sequence() -> u64 {
    NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Ordered registration record
#[derive(Debug, Clone)]
pub struct FormatterEntry {
    /// The registered formatter
    pub formatter: FormatterRef,
    /// Registration order; the only ordering key
    pub sequence: u64,
}

impl FormatterEntry {
    /// Record a registration, drawing the next sequence number
    pub fn new(formatter: FormatterRef) -> Self {
        Self {
            formatter,
            sequence: next_sequence(),
        }
    }

    /// Name of the registered formatter
    pub fn name(&self) -> &str {
        self.formatter.name()
    }
}
