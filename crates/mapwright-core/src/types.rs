//! Core data types shared by the mapping engine and the formatting subsystem
//!
//! This module contains runtime type identities, the source value abstraction
//! handed over by the traversal engine, and destination member identities.

use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a Rust type
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// diagnostics and error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Identity of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }

    /// Whether this key identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Strip the module path from a type name
///
/// `alloc::string::String` becomes `String`. Generic names are returned
/// unchanged.
pub(crate) fn short_type_name(name: &'static str) -> &'static str {
    if name.contains('<') {
        return name;
    }
    name.rsplit("::").next().unwrap_or(name)
}

/// A value read from a source member
///
/// Implemented for every `Any + Display + Send + Sync` type, so formatters can
/// downcast to the concrete type they expect and the pipeline can fall back to
/// the value's default string conversion.
pub trait SourceValue: Any + fmt::Display + Send + Sync {
    /// Upcast for downcasting to a concrete type
    fn as_any(&self) -> &dyn Any;

    /// Runtime type of the value
    fn type_key(&self) -> TypeKey;
}

impl<T> SourceValue for T
where
    T: Any + fmt::Display + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

impl<'v> fmt::Debug for dyn SourceValue + 'v {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self, self.type_key().short_name())
    }
}

/// Identity of one destination member within one type mapping
///
/// A type mapping is the pair of source and destination types; member-level
/// formatter configuration is attached to exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DestinationMember {
    /// Source type of the mapping
    pub source: TypeKey,

    /// Destination type of the mapping
    pub destination: TypeKey,

    /// Name of the destination member
    pub member: String,
}

impl DestinationMember {
    /// Member `name` of the mapping from `S` to `D`
    pub fn of<S: 'static, D: 'static>(name: impl Into<String>) -> Self {
        Self {
            source: TypeKey::of::<S>(),
            destination: TypeKey::of::<D>(),
            member: name.into(),
        }
    }

    /// Create from explicit type keys
    pub fn new(source: TypeKey, destination: TypeKey, member: impl Into<String>) -> Self {
        Self {
            source,
            destination,
            member: member.into(),
        }
    }
}

impl fmt::Display for DestinationMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}.{}",
            self.source.short_name(),
            self.destination.short_name(),
            self.member
        )
    }
}
