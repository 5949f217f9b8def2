//! Process-global, append-only annotation metadata store.
//!
//! The store maps `(kind, target, member)` to an ordered list of annotation
//! records. Records are appended in call order and never removed or
//! overwritten; re-declaring is additive. That ordering is user-observable
//! through generated spec names, so it must be stable across runs.

use hashbrown::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use annosuite_harness::TargetRef;

use crate::annotations::{
    AnnotationKind, AnnotationRecord, SuiteAnnotation, TestAnnotation, TestDataAnnotation,
};


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct StoreKey {
    kind: AnnotationKind,
    target: &'static str,
    member: Option<&'static str>,
}

static STORE: LazyLock<Mutex<HashMap<StoreKey, Vec<AnnotationRecord>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn lock_store() -> MutexGuard<'static, HashMap<StoreKey, Vec<AnnotationRecord>>> {
    STORE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Appends a record under `(kind, target, member)`.
///
/// The typed helpers ([`record_suite`], [`record_test`],
/// [`record_test_data`]) keep kind and record variant aligned; a mismatched
/// raw call is stored as given and simply never surfaces through the typed
/// getters.
pub fn record(
    kind: AnnotationKind,
    target: TargetRef,
    member: Option<&'static str>,
    record: AnnotationRecord,
) {
    log::debug!(
        "recording {kind} annotation for '{id}'{member}",
        id = target.id(),
        member = member.map(|m| format!("::{m}")).unwrap_or_default(),
    );
    lock_store()
        .entry(StoreKey {
            kind,
            target: target.id(),
            member,
        })
        .or_default()
        .push(record);
}

/// Returns every record under `(kind, target, member)` in declaration order.
///
/// Yields an empty vector, not an error, when nothing is recorded. Two
/// calls without an intervening [`record`] return equal sequences.
#[must_use]
pub fn get_all(
    kind: AnnotationKind,
    target: TargetRef,
    member: Option<&'static str>,
) -> Vec<AnnotationRecord> {
    lock_store()
        .get(&StoreKey {
            kind,
            target: target.id(),
            member,
        })
        .cloned()
        .unwrap_or_default()
}

/// Records a suite annotation for `target`.
pub fn record_suite(target: TargetRef, annotation: SuiteAnnotation) {
    record(
        AnnotationKind::Suite,
        target,
        None,
        AnnotationRecord::Suite(annotation),
    );
}

/// Records a test annotation for `target`.
///
/// The annotation carries its member name, so test records are kept in one
/// target-level list; that preserves declaration order across methods.
pub fn record_test(target: TargetRef, annotation: TestAnnotation) {
    record(
        AnnotationKind::Test,
        target,
        None,
        AnnotationRecord::Test(annotation),
    );
}

/// Records a test data annotation for `target::method`.
pub fn record_test_data(
    target: TargetRef,
    method: &'static str,
    annotation: TestDataAnnotation,
) {
    record(
        AnnotationKind::TestData,
        target,
        Some(method),
        AnnotationRecord::TestData(annotation),
    );
}

/// Returns the suite annotation for `target`, if one is recorded.
///
/// Re-declared suites are additive in storage; the first declaration wins
/// here, matching the single-annotation contract of suite declarations.
#[must_use]
pub fn suite_annotation(target: TargetRef) -> Option<SuiteAnnotation> {
    get_all(AnnotationKind::Suite, target, None)
        .iter()
        .find_map(|record| record.as_suite().cloned())
}

/// Returns every test annotation on `target` in declaration order.
#[must_use]
pub fn test_annotations(target: TargetRef) -> Vec<TestAnnotation> {
    get_all(AnnotationKind::Test, target, None)
        .iter()
        .filter_map(|record| record.as_test().cloned())
        .collect()
}

/// Returns every test data annotation for `target::method` in declaration
/// order.
#[must_use]
pub fn test_data(target: TargetRef, method: &'static str) -> Vec<TestDataAnnotation> {
    get_all(AnnotationKind::TestData, target, Some(method))
        .iter()
        .filter_map(|record| record.as_test_data().cloned())
        .collect()
}
