//! The runner: binds an adapter and expands annotated suites into specs.
//!
//! A runner has two states. Before creation nothing is bound; creation
//! resolves the configured adapter plugin, subscribes to the suite `Added`
//! event, and replays the announcement log so statically declared suites
//! reach the fresh subscription. Disposal unsubscribes, after which the
//! adapter receives no further registrations.
//!
//! Expansion is the algorithmic heart of the core: one suite `create` call
//! per announced target, then exactly one spec per (method × argument tuple)
//! combination, in declaration order, without ever instantiating the target
//! type. Spec construction itself hides behind a deferred factory invoked by
//! the engine at execution time.

use hashbrown::HashSet;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use annosuite_harness::{
    Adapter, Spec, SpecFactory, SpecOptions, SuiteOptions, TargetRef, resolve,
};

use crate::annotations::{AnnotationKind, TestAnnotation};
use crate::config::RunnerConfig;
use crate::errors::RunnerError;
use crate::{declare, events, metadata};


/// Expands annotated suites into adapter registrations.
///
/// Create one with [`Runner::create`] (configuration-driven) or
/// [`Runner::bind`] (adapter supplied directly by an embedding engine).
pub struct Runner {
    adapter: Arc<dyn Adapter>,
    subscription: Option<events::Subscription>,
}

impl Runner {
    /// Creates a runner from a resolved configuration.
    ///
    /// Fails before any event subscription occurs when no adapter is
    /// configured or the configured name resolves to no registered plugin.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::AdapterNotSpecified`],
    /// [`RunnerError::AdapterNotFound`], or any expansion error raised while
    /// replaying already announced suites.
    pub fn create(config: &RunnerConfig) -> Result<Self, RunnerError> {
        let name = config.adapter().ok_or(RunnerError::AdapterNotSpecified)?;
        let plugin = resolve(name).ok_or_else(|| RunnerError::AdapterNotFound {
            name: name.to_owned(),
        })?;
        log::debug!(
            "binding adapter '{name}' registered at {file}:{line}",
            file = plugin.file,
            line = plugin.line,
        );
        Self::bind((plugin.build)())
    }

    /// Loads configuration from `path` (or the defaults) and creates the
    /// runner from it.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from [`RunnerConfig::load`] plus
    /// everything [`Runner::create`] can raise.
    pub fn create_from_file(path: Option<&Path>) -> Result<Self, RunnerError> {
        let config = RunnerConfig::load(path)?;
        Self::create(&config)
    }

    /// Binds a runner to an adapter instance directly, bypassing plugin
    /// resolution.
    ///
    /// Ingests static declarations, subscribes to the suite `Added` event,
    /// and replays every announced suite into the adapter.
    ///
    /// # Errors
    ///
    /// Propagates the first expansion error raised during replay; the
    /// runner is dropped (and unsubscribed) in that case.
    pub fn bind(adapter: Arc<dyn Adapter>) -> Result<Self, RunnerError> {
        declare::ingest_declarations();
        let bound = Arc::clone(&adapter);
        let subscription = events::on(AnnotationKind::Suite, events::ADDED, move |target| {
            expand_suite(bound.as_ref(), target)
        });
        let runner = Self {
            adapter,
            subscription: Some(subscription),
        };
        runner.replay()?;
        Ok(runner)
    }

    /// Expands one annotated suite into the bound adapter.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MissingSuiteAnnotation`] when `target` has no
    /// recorded suite annotation, or an adapter error when a registration is
    /// rejected. Failures abort the expansion; there is no partial-suite
    /// rollback.
    pub fn add_suite(&self, target: TargetRef) -> Result<(), RunnerError> {
        expand_suite(self.adapter.as_ref(), target)
    }

    fn replay(&self) -> Result<(), RunnerError> {
        for target in declare::announced_suites() {
            self.add_suite(target)?;
        }
        Ok(())
    }

    /// Unsubscribes from the event channel. Idempotent; also run on drop.
    pub fn dispose(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            events::off(subscription);
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Expands the suite annotated on `target` into `adapter`.
fn expand_suite(adapter: &dyn Adapter, target: TargetRef) -> Result<(), RunnerError> {
    let suite = metadata::suite_annotation(target).ok_or_else(|| {
        RunnerError::MissingSuiteAnnotation {
            target: target.id().to_owned(),
        }
    })?;
    log::debug!(
        "expanding suite '{name}' for '{id}'",
        name = suite.name(),
        id = target.id(),
    );
    let mut handle = adapter.create(SuiteOptions::new(suite.name(), suite.skip()))?;

    let mut seen = HashSet::new();
    for test in metadata::test_annotations(target) {
        if !seen.insert(test.method()) {
            log::warn!(
                "duplicate test annotation for '{id}::{method}' ignored",
                id = target.id(),
                method = test.method(),
            );
            continue;
        }
        for (name, tuple) in expand_data(target, &test) {
            let method = test.method();
            let init = SpecFactory::new(move || Spec::new(target, method, tuple));
            handle.add(SpecOptions::new(name, test.skip(), init))?;
        }
    }
    Ok(())
}

/// Flattens the data annotations of one test into (display name, tuple)
/// pairs.
///
/// A test with no data annotations yields exactly one pair with an empty
/// tuple. Each data annotation may carry several tuples, so the expansion is
/// a flat-map; a data annotation's display-name override applies to every
/// tuple it contributes.
fn expand_data(target: TargetRef, test: &TestAnnotation) -> Vec<(String, Vec<Value>)> {
    let annotations = metadata::test_data(target, test.method());
    if annotations.is_empty() {
        return vec![(test.name().to_owned(), Vec::new())];
    }
    annotations
        .iter()
        .flat_map(|annotation| {
            let name = annotation.name().unwrap_or_else(|| test.name()).to_owned();
            annotation
                .sets()
                .iter()
                .cloned()
                .map(move |tuple| (name.clone(), tuple))
        })
        .collect()
}
