//! Process-wide formatting configuration
//!
//! Holds one [`FormattingConfig`] behind a lock. Writers copy the current
//! configuration, mutate the copy and publish it only once the update has
//! returned; readers take an `Arc` snapshot and never hold the lock while
//! formatting. [`reset`] publishes a
//! fresh configuration in one step, so a reader sees either the old state or
//! the cleared one.
//!
//! Configuration is expected to happen once, before concurrent mapping
//! starts. Concurrent writers are serialized but their relative order is
//! unspecified.
//!
//! Copyright (c) 2025 Mapwright Team
//! Licensed under the Apache-2.0 license

use super::config::FormattingConfig;
use super::types::{FormatterType, SharedFormatter};
use crate::types::{DestinationMember, SourceValue, TypeKey};
use crate::Result;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

static CONFIG: OnceLock<RwLock<Arc<FormattingConfig>>> = OnceLock::new();

/// Serializes writers; the slot's write lock is only held to swap the `Arc`
static WRITER: Mutex<()> = Mutex::new(());

fn slot() -> &'static RwLock<Arc<FormattingConfig>> {
    CONFIG.get_or_init(|| RwLock::new(Arc::new(FormattingConfig::default())))
}

/// Snapshot of the current process-wide configuration
pub fn current() -> Arc<FormattingConfig> {
    let guard = slot().read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&*guard)
}

fn writer() -> MutexGuard<'static, ()> {
    WRITER.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(config: FormattingConfig) {
    let mut guard = slot().write().unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::new(config);
}

/// Mutate the process-wide configuration
///
/// `update` runs on a private copy without holding the slot lock, so it may
/// read [`current`]. The copy is published only if `update` returns; a panic
/// leaves the previous configuration in place. Snapshots taken before the
/// call keep seeing the previous state.
///
/// Calling [`configure`], [`install`], [`reset`] or
/// [`set_global_instance_provider`] from inside `update` deadlocks.
pub fn configure<R>(update: impl FnOnce(&mut FormattingConfig) -> R) -> R {
    let _writer = writer();
    let mut next = FormattingConfig::clone(&current());
    let result = update(&mut next);
    publish(next);
    result
}

/// Replace the process-wide configuration wholesale
pub fn install(config: FormattingConfig) {
    let _writer = writer();
    publish(config);
}

/// Install a global instance factory for by-type formatters
pub fn set_global_instance_provider<F>(factory: F)
where
    F: Fn(&FormatterType) -> Option<SharedFormatter> + Send + Sync + 'static,
{
    configure(|config| {
        config.set_global_instance_provider(factory);
    });
    log::info!("Global formatter instance provider replaced");
}

/// Clear every registered formatter, skip set and member override, and revert
/// to the default instance provider
pub fn reset() {
    install(FormattingConfig::default());
    log::info!("Formatting configuration reset");
}

/// Resolve and apply the chain for one destination member against the
/// current configuration
pub fn resolve_and_apply(
    value: Option<&dyn SourceValue>,
    source_member: &str,
    source_type: TypeKey,
    destination: &DestinationMember,
) -> Result<Option<String>> {
    current().resolve_and_apply(value, source_member, source_type, destination)
}
