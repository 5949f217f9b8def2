//! Unit tests for the registration event channel.
//!
//! The channel is process-global; each test subscribes under a distinct
//! event name so tests cannot observe one another's handlers.

use annosuite_harness::{AdapterError, TargetRef};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{emit, off, on};
use crate::annotations::AnnotationKind;
use crate::errors::RunnerError;

fn probe_target(id: &'static str) -> TargetRef {
    TargetRef::new(id, "Probe")
}

#[test]
fn subscribers_fire_in_subscription_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let subs: Vec<_> = (0..3)
        .map(|index| {
            let order = Arc::clone(&order);
            on(AnnotationKind::Suite, "tests-order", move |_| {
                if let Ok(mut order) = order.lock() {
                    order.push(index);
                }
                Ok(())
            })
        })
        .collect();

    emit(
        AnnotationKind::Suite,
        "tests-order",
        probe_target("events::tests::Order"),
    )
    .unwrap_or_else(|error| panic!("emission failed: {error}"));

    assert_eq!(*order.lock().unwrap_or_else(|e| e.into_inner()), [0, 1, 2]);
    for sub in subs {
        off(sub);
    }
}

#[test]
fn handler_error_aborts_remaining_subscribers() {
    let later_calls = Arc::new(AtomicUsize::new(0));
    let failing = on(AnnotationKind::Suite, "tests-abort", |_| {
        Err(RunnerError::Adapter(AdapterError::Suite {
            name: "boom".into(),
            message: "rejected".into(),
        }))
    });
    let counted = Arc::clone(&later_calls);
    let counting = on(AnnotationKind::Suite, "tests-abort", move |_| {
        counted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let result = emit(
        AnnotationKind::Suite,
        "tests-abort",
        probe_target("events::tests::Abort"),
    );
    assert!(matches!(result, Err(RunnerError::Adapter(_))));
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);

    off(failing);
    off(counting);
}

#[test]
fn off_is_idempotent_and_silences_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let sub = on(AnnotationKind::Suite, "tests-off", move |_| {
        counted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let target = probe_target("events::tests::Off");

    emit(AnnotationKind::Suite, "tests-off", target)
        .unwrap_or_else(|error| panic!("emission failed: {error}"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    off(sub);
    off(sub);
    emit(AnnotationKind::Suite, "tests-off", target)
        .unwrap_or_else(|error| panic!("emission failed: {error}"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn emission_without_subscribers_is_a_no_op() {
    let result = emit(
        AnnotationKind::TestData,
        "tests-silent",
        probe_target("events::tests::Silent"),
    );
    assert!(result.is_ok());
}

#[test]
fn channels_are_keyed_by_kind_and_event() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let sub = on(AnnotationKind::Suite, "tests-keyed", move |_| {
        counted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let target = probe_target("events::tests::Keyed");

    emit(AnnotationKind::Test, "tests-keyed", target)
        .unwrap_or_else(|error| panic!("emission failed: {error}"));
    emit(AnnotationKind::Suite, "tests-other", target)
        .unwrap_or_else(|error| panic!("emission failed: {error}"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    emit(AnnotationKind::Suite, "tests-keyed", target)
        .unwrap_or_else(|error| panic!("emission failed: {error}"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    off(sub);
}
