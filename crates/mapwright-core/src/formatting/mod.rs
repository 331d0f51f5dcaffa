//! Value formatting system for mapped destination members
//!
//! Decides, for every scalar destination member, which chain of formatters is
//! applied to the mapped value and in what order, then runs that chain.
//!
//! # Module Organization
//!
//! - [`types`] - Formatter trait, resolution context and registration records
//! - [`provider`] - Construction of by-type formatters
//! - [`registry`] - Global and per-source-type chains and skip sets
//! - [`member`] - Per-destination-member overrides
//! - [`resolver`] - Chain resolution
//! - [`pipeline`] - Chain execution
//! - [`config`] - The owned configuration bundling all of the above
//! - [`global`] - Process-wide configuration with atomic reset
//! - [`built_in`] - Ready-made formatters
//! - [`summary`] - Serializable configuration reports
//!
//! # Examples
//!
//! ```
//! use mapwright_core::formatting::{built_in, FormattingConfig, FormatterRef};
//! use mapwright_core::DestinationMember;
//!
//! struct Order;
//! struct OrderDto;
//!
//! let mut config = FormattingConfig::new();
//! config.add_global_formatter::<built_in::Trim>();
//! config.add_global(built_in::template("[{v}]"));
//! config
//!     .member_of::<Order, OrderDto>("Reference")
//!     .add(FormatterRef::instance(built_in::Suffix::new("!")))
//!     .format_null_value_as("n/a");
//!
//! let member = DestinationMember::of::<Order, OrderDto>("Reference");
//! let value = "  A-17 ".to_string();
//! assert_eq!(config.format_value(&value, "Reference", &member).unwrap(), "[A-17]!");
//! ```
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

// Core types
pub mod types;

// Instance construction
pub mod provider;

// Registration stores
pub mod registry;
pub mod member;

// Resolution and execution
pub mod resolver;
pub mod pipeline;

// Configuration object and process-wide state
pub mod config;
pub mod global;

// Pre-configured formatters
pub mod built_in;

// Diagnostics
pub mod summary;


// Re-export main public types for convenience
pub use types::{
    ConstructionOverride, ExpressionFn, FormatterEntry, FormatterKind, FormatterRef, FormatterType,
    ResolutionContext, SharedFormatter, ValueFormatter,
};

pub use config::FormattingConfig;
pub use member::MemberFormatterConfig;
pub use pipeline::FormattingPipeline;
pub use provider::{InstanceFactory, InstanceProvider};
pub use registry::{FormatterRegistry, TypeRegistration};
pub use resolver::{FormatterResolver, ResolvedChain};
pub use summary::ConfigSummary;
