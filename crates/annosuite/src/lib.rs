//! Annotation-driven test suite registration core.
//!
//! `annosuite` lets engineers declare suites, tests, and parameterized test
//! data as annotations on ordinary types, then materializes those
//! declarations into whatever execution engine is configured, without the
//! declaration code knowing which engine runs it.
//!
//! The pipeline: declarations (via the [`suite!`], [`test_case!`], and
//! [`test_data!`] macros, or the runtime API in [`declare`]) land in the
//! append-only [`metadata`] store; suite declarations announce themselves on
//! the [`events`] channel; a bound [`Runner`] reacts by expanding every
//! annotated method and data tuple into spec registrations against the
//! configured [`Adapter`]. Spec construction hides behind a deferred
//! [`SpecFactory`], so the target type is never instantiated before the
//! engine actually runs a test.
//!
//! Executing test bodies, collecting results, and retry or parallelism
//! policy are the execution engine's business, reached only through the
//! adapter contract in [`annosuite_harness`].

mod annotations;
mod config;
pub mod declare;
mod errors;
pub mod events;
mod macros;
pub mod metadata;
mod runner;

pub use annotations::{
    AnnotationKind, AnnotationRecord, SuiteAnnotation, TestAnnotation, TestDataAnnotation,
};
pub use config::{
    ADAPTER_ENV_VAR, DEFAULT_CONFIG_FILE, RunnerConfig, clear_adapter_override,
    set_adapter_override,
};
pub use errors::RunnerError;
pub use runner::Runner;

pub use annosuite_harness::{
    Adapter, AdapterError, AdapterPlugin, Spec, SpecFactory, SpecOptions, SuiteHandle,
    SuiteOptions, TargetRef,
};

pub use annosuite_harness::target_ref;
pub use inventory::{iter, submit};
pub use serde_json::json;
