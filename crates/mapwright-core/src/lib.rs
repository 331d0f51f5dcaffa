//! Mapwright Core - Value formatting engine for object-to-object mapping
//!
//! This crate provides the formatter resolution and application pipeline of
//! the Mapwright mapper: given a mapped source value and the destination
//! member it flows into, it resolves the ordered chain of formatters that
//! applies and produces the final string.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **Core Types**: Runtime type identities, source values, destination members
//! - **Formatting**: Registry, member overrides, resolver, pipeline, and the
//!   process-wide configuration
//!
//! # Example
//!
//! ```
//! use mapwright_core::formatting::{FormattingConfig, FormatterRef};
//! use mapwright_core::{DestinationMember, Result, TypeKey};
//!
//! struct Reading;
//! struct ReadingDto;
//!
//! fn example() -> Result<()> {
//!     let mut config = FormattingConfig::new();
//!     config.add_global(FormatterRef::expression(|ctx| Ok(format!("{} Value", ctx.value_string()))));
//!
//!     let member = DestinationMember::of::<Reading, ReadingDto>("Value");
//!     let formatted = config.resolve_and_apply(Some(&43i32), "Value", TypeKey::of::<i32>(), &member)?;
//!     assert_eq!(formatted.as_deref(), Some("43 Value"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod formatting;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use types::{DestinationMember, SourceValue, TypeKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
