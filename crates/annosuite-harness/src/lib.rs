//! Adapter contracts for `annosuite`.
//!
//! This crate is the framework-agnostic boundary between the annotation core
//! and whatever execution engine ultimately runs the tests. It defines the
//! [`Spec`] descriptor and its deferred [`SpecFactory`], the [`Adapter`] and
//! [`SuiteHandle`] registration traits, and the [`AdapterPlugin`] registry
//! through which a configured adapter is resolved by name.
//!
//! The crate deliberately knows nothing about annotations, metadata storage,
//! or expansion; it only describes what an engine integration must accept.

mod adapter;
mod plugin;
mod spec;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use adapter::{Adapter, AdapterError, SpecOptions, SuiteHandle, SuiteOptions};
pub use plugin::{AdapterPlugin, resolve};
pub use spec::{Spec, SpecFactory, TargetRef};

pub use inventory::{iter, submit};
