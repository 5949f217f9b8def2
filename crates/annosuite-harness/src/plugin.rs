//! Adapter plugin registration and name-based resolution.
//!
//! Configuration names an adapter; this module resolves that name against
//! the plugins linked into the binary. Plugins register through the
//! [`register_adapter!`](crate::register_adapter) macro, which collects a
//! [`AdapterPlugin`] record at link time.

use std::sync::Arc;

use crate::adapter::Adapter;

/// A named adapter implementation linked into the current binary.
///
/// Records are collected through `inventory`; use
/// [`register_adapter!`](crate::register_adapter) rather than constructing
/// one by hand.
pub struct AdapterPlugin {
    /// Name the configuration uses to select this adapter.
    pub name: &'static str,
    /// Builds the bound adapter instance.
    pub build: fn() -> Arc<dyn Adapter>,
    /// Source file where the plugin is registered.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

inventory::collect!(AdapterPlugin);

/// Registers an adapter under a configuration-visible name.
///
/// # Examples
///
/// ```
/// use annosuite_harness::{
///     Adapter, AdapterError, SuiteHandle, SuiteOptions, register_adapter, resolve,
/// };
/// use std::sync::Arc;
///
/// struct NullAdapter;
///
/// struct NullSuite;
///
/// impl SuiteHandle for NullSuite {
///     fn add(&mut self, _spec: annosuite_harness::SpecOptions) -> Result<(), AdapterError> {
///         Ok(())
///     }
/// }
///
/// impl Adapter for NullAdapter {
///     fn create(&self, _suite: SuiteOptions) -> Result<Box<dyn SuiteHandle>, AdapterError> {
///         Ok(Box::new(NullSuite))
///     }
/// }
///
/// register_adapter!("null", || Arc::new(NullAdapter));
///
/// let plugin = resolve("null").unwrap_or_else(|| panic!("plugin should resolve"));
/// assert_eq!(plugin.name, "null");
/// ```
#[macro_export]
macro_rules! register_adapter {
    ($name:expr, $build:expr) => {
        $crate::submit! {
            $crate::AdapterPlugin {
                name: $name,
                build: $build,
                file: file!(),
                line: line!(),
            }
        }
    };
}

/// Resolves a registered adapter plugin by name.
///
/// Link-section iteration order is unspecified, so when several plugins share
/// a name the one registered earliest by (file, line) wins deterministically
/// and the collision is logged.
#[must_use]
pub fn resolve(name: &str) -> Option<&'static AdapterPlugin> {
    let mut candidates: Vec<&'static AdapterPlugin> = inventory::iter::<AdapterPlugin>
        .into_iter()
        .filter(|plugin| plugin.name == name)
        .collect();
    candidates.sort_by_key(|plugin| (plugin.file, plugin.line));
    if candidates.len() > 1 {
        log::warn!(
            "{count} adapter plugins registered under '{name}'; using the one at {file}:{line}",
            count = candidates.len(),
            file = candidates[0].file,
            line = candidates[0].line,
        );
    }
    candidates.first().copied()
}
