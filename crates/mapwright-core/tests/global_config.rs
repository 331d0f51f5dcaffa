//! Tests of the process-wide formatting configuration
//!
//! All tests in this file share one process-wide configuration, so each one
//! holds `GLOBAL_LOCK` and starts from a reset.


use mapwright_core::formatting::{built_in, global, FormatterRef, SharedFormatter};
use mapwright_core::TypeKey;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier, Mutex, MutexGuard};
use std::thread;
use test_support::{invoice_member, Currency};

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    let guard = GLOBAL_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global::reset();
    guard
}

fn apply(value: i32) -> Option<String> {
    global::resolve_and_apply(Some(&value), "Count", TypeKey::of::<i32>(), &invoice_member("Count"))
        .expect("formatting should succeed")
}

#[test]
fn test_configure_then_apply() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(built_in::template("#{v}"));
    });

    assert_eq!(apply(7).as_deref(), Some("#7"));
}

#[test]
fn test_reset_restores_unconfigured_behavior() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(built_in::template("#{v}"));
        config.member(invoice_member("Count")).format_null_value_as("zero");
    });
    global::set_global_instance_provider(|_| None);
    assert!(!global::current().is_empty());

    global::reset();
    assert!(global::current().is_empty());
    assert_eq!(apply(7).as_deref(), Some("7"));
}

#[test]
fn test_global_instance_provider() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global_formatter_type::<Currency>();
    });
    global::set_global_instance_provider(|requested| {
        requested
            .key()
            .is::<Currency>()
            .then(|| Arc::new(Currency::new("€")) as SharedFormatter)
    });

    assert_eq!(apply(5).as_deref(), Some("€5"));
}

#[test]
fn test_panicking_configure_publishes_nothing() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(built_in::template("#{v}"));
    });

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        global::configure(|config| {
            config.add_global(built_in::template("half-{v}"));
            panic!("configuration aborted");
        })
    }));
    assert!(outcome.is_err());

    assert_eq!(global::current().registry().global_chain().len(), 1);
    assert_eq!(apply(7).as_deref(), Some("#7"));

    global::configure(|config| {
        config.add_global(built_in::template("{v}!"));
    });
    assert_eq!(apply(7).as_deref(), Some("#7!"));
}

#[test]
fn test_configure_can_read_current_configuration() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(built_in::template("#{v}"));
    });

    let seen = global::configure(|config| {
        let published = global::current().registry().global_chain().len();
        config.add_global(built_in::template("{v}!"));
        published
    });

    assert_eq!(seen, 1);
    assert_eq!(apply(7).as_deref(), Some("#7!"));
}

#[test]
fn test_snapshot_survives_reset() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(FormatterRef::instance(built_in::Suffix::new("!")));
    });

    let snapshot = global::current();
    global::reset();

    let value = 1i32;
    let member = invoice_member("Count");
    let before = snapshot
        .resolve_and_apply(Some(&value), "Count", TypeKey::of::<i32>(), &member)
        .unwrap();
    assert_eq!(before.as_deref(), Some("1!"));
    assert_eq!(apply(1).as_deref(), Some("1"));
}

#[test]
fn test_concurrent_readers_never_see_torn_state() {
    let _guard = exclusive();
    global::configure(|config| {
        config.add_global(built_in::template("<{v}"));
        config.add_global(built_in::template("{v}>"));
    });

    let barrier = Arc::new(Barrier::new(5));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..500 {
                    let result = apply(3);
                    let result = result.as_deref();
                    assert!(
                        result == Some("<3>") || result == Some("3"),
                        "torn configuration observed: {result:?}"
                    );
                }
            })
        })
        .collect();

    barrier.wait();
    global::reset();

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
}
