//! Adapter and suite-handle traits for engine integrations.

use thiserror::Error;

use crate::spec::SpecFactory;

/// Suite-level information passed to [`Adapter::create`].
///
/// # Examples
///
/// ```
/// use annosuite_harness::SuiteOptions;
///
/// let options = SuiteOptions::new("login", false);
/// assert_eq!(options.name(), "login");
/// assert!(!options.skip());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteOptions {
    name: String,
    skip: bool,
}

impl SuiteOptions {
    /// Creates options for one suite registration.
    #[must_use]
    pub fn new(name: impl Into<String>, skip: bool) -> Self {
        Self {
            name: name.into(),
            skip,
        }
    }

    /// Returns the suite display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the whole suite should be skipped by the engine.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }
}

/// Spec-level information passed to [`SuiteHandle::add`].
///
/// The `init` factory is passed, never invoked, at registration time; the
/// engine calls it when it actually runs the test.
#[derive(Debug)]
pub struct SpecOptions {
    name: String,
    skip: bool,
    init: SpecFactory,
}

impl SpecOptions {
    /// Creates options for one spec registration.
    #[must_use]
    pub fn new(name: impl Into<String>, skip: bool, init: SpecFactory) -> Self {
        Self {
            name: name.into(),
            skip,
            init,
        }
    }

    /// Returns the spec display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the engine should skip this spec.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }

    /// Consumes the options, yielding the name, skip flag, and factory.
    #[must_use]
    pub fn into_parts(self) -> (String, bool, SpecFactory) {
        (self.name, self.skip, self.init)
    }
}

/// Errors surfaced by an adapter while registering suites or specs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdapterError {
    /// The engine rejected a suite registration.
    #[error("adapter rejected suite '{name}': {message}")]
    Suite {
        /// Display name of the rejected suite.
        name: String,
        /// Engine-specific reason for the rejection.
        message: String,
    },
    /// The engine rejected a spec registration.
    #[error("adapter rejected spec '{name}': {message}")]
    Spec {
        /// Display name of the rejected spec.
        name: String,
        /// Engine-specific reason for the rejection.
        message: String,
    },
}

/// A registered suite accepting spec registrations.
///
/// The registration core drops the handle as soon as expansion for the suite
/// finishes; the adapter owns whatever concrete structure the handle fed.
pub trait SuiteHandle {
    /// Registers one spec under this suite.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Spec`] when the engine rejects the
    /// registration.
    fn add(&mut self, spec: SpecOptions) -> Result<(), AdapterError>;
}

/// Translates abstract suite descriptions into a concrete engine's native
/// registration calls.
///
/// Implementations must treat the [`SpecFactory`] inside [`SpecOptions`] as
/// deferred work: invoke it when running the test, never at registration.
pub trait Adapter: Send + Sync {
    /// Registers one suite and returns a handle accepting its specs.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Suite`] when the engine rejects the
    /// registration.
    fn create(&self, suite: SuiteOptions) -> Result<Box<dyn SuiteHandle>, AdapterError>;
}
