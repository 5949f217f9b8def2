//! Declaration records, ingestion, and the runtime registration API.
//!
//! Registration is a two-phase protocol. Phase one attaches declarations:
//! either statically through the [`suite!`](crate::suite),
//! [`test_case!`](crate::test_case), and [`test_data!`](crate::test_data)
//! macros, which collect records at link time, or at runtime through
//! [`declare_suite`] and friends. Phase two binds a runner, which ingests
//! the static records into the metadata store and replays the announcement
//! log so no statically declared suite is lost to a late subscriber.
//!
//! Link-section iteration order is unspecified, so ingestion sorts all
//! collected records by (file, line). Declaration order therefore means
//! source order, which keeps generated spec names stable across runs.

use std::sync::{LazyLock, Mutex, MutexGuard, Once, PoisonError};

use annosuite_harness::TargetRef;
use serde_json::Value;

use crate::annotations::{
    AnnotationKind, SuiteAnnotation, TestAnnotation, TestDataAnnotation,
};
use crate::errors::RunnerError;
use crate::{events, metadata};

/// A statically collected suite declaration.
///
/// Produced by [`suite!`](crate::suite); not meant for manual construction.
pub struct SuiteDecl {
    /// The annotated target type.
    pub target: TargetRef,
    /// Suite display name.
    pub name: &'static str,
    /// Whether the whole suite is skipped.
    pub skip: bool,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

/// A statically collected test declaration.
///
/// Produced by [`test_case!`](crate::test_case).
pub struct TestDecl {
    /// The annotated target type.
    pub target: TargetRef,
    /// Member the test invokes.
    pub method: &'static str,
    /// Test display name.
    pub name: &'static str,
    /// Whether the test is skipped.
    pub skip: bool,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

/// A statically collected test data declaration.
///
/// Produced by [`test_data!`](crate::test_data). Argument tuples are
/// non-const data, so they live behind a thunk evaluated at ingestion time.
pub struct DataDecl {
    /// The annotated target type.
    pub target: TargetRef,
    /// Member the data feeds.
    pub method: &'static str,
    /// Thunk yielding the argument tuples of this data set.
    pub sets: fn() -> Vec<Vec<Value>>,
    /// Optional display-name override for the contributed specs.
    pub name: Option<&'static str>,
    /// Optional informational label.
    pub test_name: Option<&'static str>,
    /// Source file of the declaration.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

inventory::collect!(SuiteDecl);
inventory::collect!(TestDecl);
inventory::collect!(DataDecl);

static ANNOUNCED: LazyLock<Mutex<Vec<TargetRef>>> = LazyLock::new(|| Mutex::new(Vec::new()));

static INGEST: Once = Once::new();

fn lock_announced() -> MutexGuard<'static, Vec<TargetRef>> {
    ANNOUNCED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Appends `target` to the announcement log unless it is already present.
///
/// Returns whether the target was newly announced.
fn announce(target: TargetRef) -> bool {
    let mut announced = lock_announced();
    if announced.contains(&target) {
        log::debug!("suite '{id}' already announced", id = target.id());
        return false;
    }
    announced.push(target);
    true
}

/// Returns the announced suite targets in announcement order.
pub(crate) fn announced_suites() -> Vec<TargetRef> {
    lock_announced().clone()
}

fn sorted<T: inventory::Collect>(
    key: impl Fn(&'static T) -> (&'static str, u32),
) -> Vec<&'static T> {
    let mut decls: Vec<&'static T> = inventory::iter::<T>.into_iter().collect();
    decls.sort_by_key(|decl| key(*decl));
    decls
}

/// Ingests every statically collected declaration into the metadata store,
/// once per process.
///
/// Suite declarations additionally land in the announcement log, from which
/// a binding runner replays them. Calling this again is a no-op.
pub fn ingest_declarations() {
    INGEST.call_once(|| {
        let suites = sorted::<SuiteDecl>(|decl| (decl.file, decl.line));
        let tests = sorted::<TestDecl>(|decl| (decl.file, decl.line));
        let data = sorted::<DataDecl>(|decl| (decl.file, decl.line));
        log::debug!(
            "ingesting {} suite, {} test, {} data declaration(s)",
            suites.len(),
            tests.len(),
            data.len(),
        );
        for decl in tests {
            metadata::record_test(
                decl.target,
                TestAnnotation::new(decl.name, decl.method, decl.skip),
            );
        }
        for decl in data {
            let mut annotation = TestDataAnnotation::new((decl.sets)());
            if let Some(name) = decl.name {
                annotation = annotation.with_name(name);
            }
            if let Some(test_name) = decl.test_name {
                annotation = annotation.with_test_name(test_name);
            }
            metadata::record_test_data(decl.target, decl.method, annotation);
        }
        for decl in suites {
            metadata::record_suite(decl.target, SuiteAnnotation::new(decl.name, decl.skip));
            announce(decl.target);
        }
    });
}

/// Declares `target` as a suite at runtime: records the annotation,
/// announces the target, and emits the suite `Added` event.
///
/// Emission is synchronous; a bound runner expands the suite before this
/// call returns. A runner bound later replays the announcement instead, so
/// the declaration is not lost. Re-declaring an already announced target
/// records the annotation additively but does not announce or emit again.
///
/// # Errors
///
/// Propagates the first subscriber error, aborting the remaining
/// subscribers for this emission. Callers must not assume partial suite
/// registration succeeded.
pub fn declare_suite(target: TargetRef, annotation: SuiteAnnotation) -> Result<(), RunnerError> {
    metadata::record_suite(target, annotation);
    if announce(target) {
        events::emit(AnnotationKind::Suite, events::ADDED, target)?;
    }
    Ok(())
}

/// Declares a test member of `target` at runtime.
pub fn declare_test(target: TargetRef, annotation: TestAnnotation) {
    metadata::record_test(target, annotation);
}

/// Declares a data set for `target::method` at runtime.
pub fn declare_test_data(
    target: TargetRef,
    method: &'static str,
    annotation: TestDataAnnotation,
) {
    metadata::record_test_data(target, method, annotation);
}
