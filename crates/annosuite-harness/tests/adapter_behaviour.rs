//! Behavioural tests for the adapter contract and plugin resolution.

use annosuite_harness::{
    Adapter, AdapterError, AdapterPlugin, Spec, SpecFactory, SpecOptions, SuiteHandle,
    SuiteOptions, TargetRef, register_adapter, resolve, target_ref,
};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Adapter counting registrations without storing them.
#[derive(Default)]
struct CountingAdapter {
    suites: AtomicUsize,
    specs: Arc<AtomicUsize>,
}

struct CountingSuiteHandle {
    specs: Arc<AtomicUsize>,
    factories: Arc<Mutex<Vec<SpecFactory>>>,
}

impl SuiteHandle for CountingSuiteHandle {
    fn add(&mut self, spec: SpecOptions) -> Result<(), AdapterError> {
        self.specs.fetch_add(1, Ordering::SeqCst);
        let (_, _, init) = spec.into_parts();
        if let Ok(mut factories) = self.factories.lock() {
            factories.push(init);
        }
        Ok(())
    }
}

impl Adapter for CountingAdapter {
    fn create(&self, _suite: SuiteOptions) -> Result<Box<dyn SuiteHandle>, AdapterError> {
        self.suites.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSuiteHandle {
            specs: Arc::clone(&self.specs),
            factories: Arc::new(Mutex::new(Vec::new())),
        }))
    }
}

fn deferred(target: TargetRef, method: &'static str) -> SpecFactory {
    SpecFactory::new(move || Spec::new(target, method, vec![serde_json::json!(1)]))
}

#[rstest]
#[case("adds")]
#[case("subtracts")]
fn handle_accepts_specs_without_invoking_factories(#[case] method: &'static str) {
    struct Probe;
    let target = target_ref!(Probe);
    let adapter = CountingAdapter::default();
    let mut handle = adapter
        .create(SuiteOptions::new("arithmetic", false))
        .unwrap_or_else(|error| panic!("create failed: {error}"));
    handle
        .add(SpecOptions::new(method, false, deferred(target, method)))
        .unwrap_or_else(|error| panic!("add failed: {error}"));
    assert_eq!(adapter.suites.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.specs.load(Ordering::SeqCst), 1);
}

#[test]
fn spec_options_round_trip_their_parts() {
    struct Probe;
    let target = target_ref!(Probe);
    let options = SpecOptions::new("adds", true, deferred(target, "adds"));
    assert_eq!(options.name(), "adds");
    assert!(options.skip());
    let (name, skip, init) = options.into_parts();
    assert_eq!(name, "adds");
    assert!(skip);
    let spec = init.produce();
    assert_eq!(spec.method(), "adds");
    assert_eq!(spec.data(), [serde_json::json!(1)]);
}

register_adapter!("behaviour-counting", || {
    Arc::new(CountingAdapter::default())
});

#[test]
fn registered_plugin_resolves_and_builds() {
    let plugin: &AdapterPlugin =
        resolve("behaviour-counting").unwrap_or_else(|| panic!("plugin should resolve"));
    let adapter = (plugin.build)();
    let handle = adapter.create(SuiteOptions::new("resolved", false));
    assert!(handle.is_ok());
}

#[test]
fn unknown_plugin_name_is_a_miss() {
    assert!(resolve("behaviour-unknown").is_none());
}
