//! Recording and failing adapters shared by behaviour tests.
//!
//! [`RecordingAdapter`] captures every `create`/`add` call without touching
//! the deferred factories, so tests can assert both the registered shape of a
//! suite tree and the laziness of spec construction. [`FailingAdapter`]
//! rejects registrations on demand to exercise error propagation.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::adapter::{Adapter, AdapterError, SpecOptions, SuiteHandle, SuiteOptions};
use crate::spec::{Spec, SpecFactory};

/// One spec registration captured by a [`RecordingAdapter`].
#[derive(Debug)]
pub struct RecordedSpec {
    name: String,
    skip: bool,
    init: Option<SpecFactory>,
}

impl RecordedSpec {
    /// Returns the registered spec name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the registered skip flag.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }

    /// Returns whether the deferred factory is still un-invoked.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.init.is_some()
    }

    /// Invokes the stored factory, yielding the spec it defers.
    ///
    /// # Panics
    ///
    /// Panics when the factory was already consumed; registration must hand
    /// over exactly one factory per spec.
    #[must_use]
    pub fn produce(&mut self) -> Spec {
        self.init
            .take()
            .unwrap_or_else(|| panic!("spec '{}' has no pending factory", self.name))
            .produce()
    }
}

/// One suite registration captured by a [`RecordingAdapter`].
#[derive(Debug)]
pub struct RecordedSuite {
    name: String,
    skip: bool,
    specs: Vec<RecordedSpec>,
}

impl RecordedSuite {
    /// Returns the registered suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the registered skip flag.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }

    /// Returns the captured spec registrations in registration order.
    #[must_use]
    pub fn specs(&self) -> &[RecordedSpec] {
        &self.specs
    }

    /// Returns the captured spec registrations for consumption.
    pub fn specs_mut(&mut self) -> &mut [RecordedSpec] {
        &mut self.specs
    }
}

/// Adapter that records registrations instead of scheduling execution.
///
/// Cloning shares the underlying recording, so a test can keep one clone and
/// hand the other to the registration core.
#[derive(Clone, Default)]
pub struct RecordingAdapter {
    suites: Arc<Mutex<Vec<RecordedSuite>>>,
}

impl RecordingAdapter {
    /// Creates an empty recording adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedSuite>> {
        match self.suites.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns how many suites have been registered so far.
    #[must_use]
    pub fn suite_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns the registered suite names in registration order.
    #[must_use]
    pub fn suite_names(&self) -> Vec<String> {
        self.lock().iter().map(|suite| suite.name.clone()).collect()
    }

    /// Drains and returns everything recorded so far.
    #[must_use]
    pub fn take_suites(&self) -> Vec<RecordedSuite> {
        std::mem::take(&mut *self.lock())
    }

    /// Drains and returns the recorded suite with the given name, if any.
    #[must_use]
    pub fn take_suite(&self, name: &str) -> Option<RecordedSuite> {
        let mut suites = self.lock();
        let index = suites.iter().position(|suite| suite.name == name)?;
        Some(suites.remove(index))
    }
}

struct RecordingSuiteHandle {
    suites: Arc<Mutex<Vec<RecordedSuite>>>,
    index: usize,
}

impl SuiteHandle for RecordingSuiteHandle {
    fn add(&mut self, spec: SpecOptions) -> Result<(), AdapterError> {
        let (name, skip, init) = spec.into_parts();
        let mut suites = match self.suites.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(suite) = suites.get_mut(self.index) else {
            return Err(AdapterError::Spec {
                name,
                message: "suite record was drained before registration finished".into(),
            });
        };
        suite.specs.push(RecordedSpec {
            name,
            skip,
            init: Some(init),
        });
        Ok(())
    }
}

impl Adapter for RecordingAdapter {
    fn create(&self, suite: SuiteOptions) -> Result<Box<dyn SuiteHandle>, AdapterError> {
        let mut suites = self.lock();
        let index = suites.len();
        suites.push(RecordedSuite {
            name: suite.name().to_owned(),
            skip: suite.skip(),
            specs: Vec::new(),
        });
        Ok(Box::new(RecordingSuiteHandle {
            suites: Arc::clone(&self.suites),
            index,
        }))
    }
}

/// Where a [`FailingAdapter`] should reject the registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    /// Reject in [`Adapter::create`].
    Create,
    /// Reject in [`SuiteHandle::add`].
    Add,
}

/// Adapter that rejects registrations at a chosen point.
#[derive(Clone, Copy, Debug)]
pub struct FailingAdapter {
    point: FailurePoint,
}

impl FailingAdapter {
    /// Creates an adapter failing at the given registration point.
    #[must_use]
    pub const fn new(point: FailurePoint) -> Self {
        Self { point }
    }
}

struct FailingSuiteHandle;

impl SuiteHandle for FailingSuiteHandle {
    fn add(&mut self, spec: SpecOptions) -> Result<(), AdapterError> {
        Err(AdapterError::Spec {
            name: spec.name().to_owned(),
            message: "failing adapter rejects all specs".into(),
        })
    }
}

impl Adapter for FailingAdapter {
    fn create(&self, suite: SuiteOptions) -> Result<Box<dyn SuiteHandle>, AdapterError> {
        match self.point {
            FailurePoint::Create => Err(AdapterError::Suite {
                name: suite.name().to_owned(),
                message: "failing adapter rejects all suites".into(),
            }),
            FailurePoint::Add => Ok(Box::new(FailingSuiteHandle)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the shared test adapters.

    use super::{FailingAdapter, FailurePoint, RecordingAdapter};
    use crate::adapter::{Adapter, SpecOptions, SuiteOptions};
    use crate::spec::{Spec, SpecFactory, TargetRef};

    fn factory_for(method: &'static str) -> SpecFactory {
        let target = TargetRef::new("test_utils::Fixture", "Fixture");
        SpecFactory::new(move || Spec::new(target, method, vec![]))
    }

    #[test]
    fn recording_adapter_captures_registration_order() {
        let adapter = RecordingAdapter::new();
        let mut handle = adapter
            .create(SuiteOptions::new("arithmetic", false))
            .unwrap_or_else(|error| panic!("create failed: {error}"));
        handle
            .add(SpecOptions::new("adds", false, factory_for("adds")))
            .unwrap_or_else(|error| panic!("add failed: {error}"));
        handle
            .add(SpecOptions::new("subtracts", true, factory_for("subtracts")))
            .unwrap_or_else(|error| panic!("add failed: {error}"));

        let mut suites = adapter.take_suites();
        assert_eq!(suites.len(), 1);
        let suite = &mut suites[0];
        assert_eq!(suite.name(), "arithmetic");
        let names: Vec<_> = suite.specs().iter().map(|s| s.name().to_owned()).collect();
        assert_eq!(names, ["adds", "subtracts"]);
        assert!(suite.specs()[1].skip());
        assert!(suite.specs().iter().all(super::RecordedSpec::is_pending));
        assert_eq!(suite.specs_mut()[0].produce().method(), "adds");
    }

    #[test]
    fn failing_adapter_rejects_where_asked() {
        let at_create = FailingAdapter::new(FailurePoint::Create);
        assert!(at_create.create(SuiteOptions::new("any", false)).is_err());

        let at_add = FailingAdapter::new(FailurePoint::Add);
        let mut handle = at_add
            .create(SuiteOptions::new("any", false))
            .unwrap_or_else(|error| panic!("create failed: {error}"));
        assert!(
            handle
                .add(SpecOptions::new("spec", false, factory_for("spec")))
                .is_err()
        );
    }
}
