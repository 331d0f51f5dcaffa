//! Built-in formatters for common operations
//!
//! Ready-made formatters for string normalization, affixes, dates and fixed
//! decimal numbers. Types implementing `Default` can be registered by type;
//! the others need an instance or a construction override.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::types::{FormatterRef, ResolutionContext, ValueFormatter};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::{self, Write};

/// Removes leading and trailing whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

impl ValueFormatter for Trim {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        Ok(context.value_string().trim().to_string())
    }
}

/// Converts to upper case
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl ValueFormatter for UpperCase {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        Ok(context.value_string().to_uppercase())
    }
}

/// Converts to lower case
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl ValueFormatter for LowerCase {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        Ok(context.value_string().to_lowercase())
    }
}

/// Prepends a fixed string
#[derive(Debug, Clone)]
pub struct Prefix(pub String);

impl Prefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl ValueFormatter for Prefix {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        Ok(format!("{}{}", self.0, context.value_string()))
    }
}

/// Appends a fixed string
#[derive(Debug, Clone)]
pub struct Suffix(pub String);

impl Suffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }
}

impl ValueFormatter for Suffix {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        Ok(format!("{}{}", context.value_string(), self.0))
    }
}

/// Formats dates and timestamps with a `strftime` pattern
///
/// Accepts `NaiveDate`, `NaiveDateTime` and `DateTime<Utc>` values. Anything
/// else, including strings produced by an earlier formatter, is an invalid
/// operation.
#[derive(Debug, Clone)]
pub struct DateTimeFormat {
    pub pattern: String,
}

impl DateTimeFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self::new("%Y-%m-%d")
    }
}

impl DateTimeFormat {
    /// Render a chrono formatting adapter, failing instead of panicking when
    /// the pattern has items the value cannot supply
    fn render(&self, formatted: impl fmt::Display, context: &ResolutionContext<'_>) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", formatted).map_err(|_| {
            Error::invalid_operation(
                self.name(),
                format!("invalid date format pattern '{}' for this value", self.pattern),
                value_type_name(context),
            )
        })?;
        Ok(out)
    }
}

impl ValueFormatter for DateTimeFormat {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        if let Some(date) = context.value_as::<NaiveDate>() {
            return self.render(date.format(&self.pattern), context);
        }
        if let Some(timestamp) = context.value_as::<NaiveDateTime>() {
            return self.render(timestamp.format(&self.pattern), context);
        }
        if let Some(timestamp) = context.value_as::<DateTime<Utc>>() {
            return self.render(timestamp.format(&self.pattern), context);
        }

        Err(Error::invalid_operation(
            self.name(),
            "expected a date or timestamp value",
            value_type_name(context),
        ))
    }
}

fn value_type_name(context: &ResolutionContext<'_>) -> &'static str {
    context.value_type().map(|t| t.name()).unwrap_or("null")
}

/// Formats numbers with a fixed number of decimal places
///
/// Accepts `f32`, `f64`, every primitive integer type, and strings that parse
/// as a number. Integers are written exactly, with zero decimals appended, so
/// 64-bit values above 2^53 keep every digit.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecimals {
    pub places: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Integer(i128),
    Float(f64),
}

impl FixedDecimals {
    pub fn new(places: usize) -> Self {
        Self { places }
    }

    fn numeric_value(context: &ResolutionContext<'_>) -> Option<Number> {
        macro_rules! integer {
            ($($ty:ty),*) => {
                $(
                    if let Some(v) = context.value_as::<$ty>() {
                        return Some(Number::Integer(i128::from(*v)));
                    }
                )*
            };
        }

        if let Some(v) = context.value_as::<f64>() {
            return Some(Number::Float(*v));
        }
        if let Some(v) = context.value_as::<f32>() {
            return Some(Number::Float(f64::from(*v)));
        }
        integer!(i8, i16, i32, i64, u8, u16, u32, u64);
        if let Some(v) = context.value_as::<isize>() {
            return i128::try_from(*v).ok().map(Number::Integer);
        }
        if let Some(v) = context.value_as::<usize>() {
            return i128::try_from(*v).ok().map(Number::Integer);
        }
        if let Some(s) = context.value_as::<String>() {
            return Self::parse(s);
        }
        context.value_as::<&'static str>().and_then(|s| Self::parse(s))
    }

    fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        text.parse::<i128>()
            .map(Number::Integer)
            .or_else(|_| text.parse::<f64>().map(Number::Float))
            .ok()
    }
}

impl Default for FixedDecimals {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ValueFormatter for FixedDecimals {
    fn format(&self, context: &ResolutionContext<'_>) -> Result<String> {
        let number = Self::numeric_value(context).ok_or_else(|| {
            Error::invalid_operation(self.name(), "expected a numeric value", value_type_name(context))
        })?;
        Ok(match number {
            Number::Integer(n) if self.places == 0 => n.to_string(),
            Number::Integer(n) => format!("{}.{}", n, "0".repeat(self.places)),
            Number::Float(n) => format!("{:.*}", self.places, n),
        })
    }
}

/// Inline formatter from a plain string transformation of the running value
pub fn map_string<M>(name: impl Into<String>, map: M) -> FormatterRef
where
    M: Fn(&str) -> String + Send + Sync + 'static,
{
    FormatterRef::named_expression(name, move |context| Ok(map(&context.value_string())))
}

/// Inline formatter substituting the value into `template` at `{v}`, and the
/// source member name at `{name}`
///
/// Placeholders are only recognized in the template itself; substituted text
/// is copied through verbatim.
pub fn template(template: impl Into<String>) -> FormatterRef {
    let template = template.into();
    let name = format!("template({})", template);
    FormatterRef::named_expression(name, move |context| {
        Ok(fill_template(&template, &context.value_string(), context.source_member()))
    })
}

fn fill_template(template: &str, value: &str, member: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{v}") {
            out.push_str(value);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{name}") {
            out.push_str(member);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
