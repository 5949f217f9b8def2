//! Error taxonomy for configuration, registry consistency, and expansion.

use std::error::Error as StdError;
use std::path::PathBuf;

use annosuite_harness::AdapterError;
use thiserror::Error;

/// Errors surfaced by runner creation and suite expansion.
///
/// Every variant is fatal at the point it occurs; the core never retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunnerError {
    /// The resolved configuration names no adapter.
    #[error("no test runner adapter specified")]
    AdapterNotSpecified,
    /// The configured adapter name matches no registered plugin.
    #[error("no adapter plugin registered under '{name}'")]
    AdapterNotFound {
        /// The adapter name the configuration asked for.
        name: String,
    },
    /// The configuration resource could not be read or parsed.
    #[error("configuration '{}': {source}", path.display())]
    Config {
        /// Path of the offending configuration resource.
        path: PathBuf,
        /// Root cause from the reader or parser.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// An `Added` event fired for a target with no recorded suite
    /// annotation. This signals a registry/event inconsistency bug, not bad
    /// user input.
    #[error("no suite annotation recorded for target '{target}'")]
    MissingSuiteAnnotation {
        /// Fully qualified id of the offending target.
        target: String,
    },
    /// The adapter rejected a suite or spec registration.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl RunnerError {
    /// Wraps a configuration read/parse failure with its path.
    #[must_use]
    pub fn config(path: impl Into<PathBuf>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Config {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error display formatting.

    use super::RunnerError;

    #[test]
    fn adapter_not_specified_matches_user_visible_wording() {
        assert_eq!(
            RunnerError::AdapterNotSpecified.to_string(),
            "no test runner adapter specified"
        );
    }

    #[test]
    fn missing_suite_annotation_names_the_target() {
        let error = RunnerError::MissingSuiteAnnotation {
            target: "demo::Orphan".into(),
        };
        assert!(error.to_string().contains("demo::Orphan"));
    }
}
