//! Runner configuration resolution.
//!
//! The configuration is a thin interface: a JSON resource exposing an
//! `adapter` field naming a registered adapter plugin. An explicit path must
//! exist and parse; with no path, `annosuite.json` in the working directory
//! is used when present. The `ANNOSUITE_ADAPTER` environment variable
//! overrides the file value, and an in-process override (for tests and
//! embedders) takes precedence over both.

use serde::Deserialize;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::errors::RunnerError;

/// Name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "annosuite.json";

/// Environment variable overriding the configured adapter name.
pub const ADAPTER_ENV_VAR: &str = "ANNOSUITE_ADAPTER";

static ADAPTER_OVERRIDE: Mutex<Option<String>> = Mutex::new(None);

/// Overrides the adapter name for the current process.
///
/// The override outranks both the configuration file and the
/// [`ADAPTER_ENV_VAR`] environment variable. Call
/// [`clear_adapter_override`] to restore file/environment driven behaviour.
pub fn set_adapter_override(name: impl Into<String>) {
    *ADAPTER_OVERRIDE
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(name.into());
}

/// Removes any in-process adapter override.
pub fn clear_adapter_override() {
    *ADAPTER_OVERRIDE
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

fn override_state() -> Option<String> {
    ADAPTER_OVERRIDE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn env_adapter() -> Option<String> {
    std::env::var(ADAPTER_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Resolved runner configuration.
///
/// # Examples
///
/// ```
/// use annosuite::RunnerConfig;
///
/// let config: RunnerConfig = serde_json::from_str(r#"{ "adapter": "recording" }"#)
///     .unwrap_or_else(|error| panic!("parse failed: {error}"));
/// assert_eq!(config.adapter(), Some("recording"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    adapter: Option<String>,
}

impl RunnerConfig {
    /// Creates a configuration naming an adapter directly.
    #[must_use]
    pub fn with_adapter(name: impl Into<String>) -> Self {
        Self {
            adapter: Some(name.into()),
        }
    }

    /// Returns the configured adapter name, if any.
    #[must_use]
    pub fn adapter(&self) -> Option<&str> {
        self.adapter.as_deref()
    }

    /// Loads the configuration from `path`, falling back to
    /// [`DEFAULT_CONFIG_FILE`] and then to the empty default, then applies
    /// the in-process and [`ADAPTER_ENV_VAR`] overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] when an explicit path (or an existing
    /// default file) cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, RunnerError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        if let Some(name) = override_state().or_else(env_adapter) {
            log::debug!("adapter '{name}' resolved from override");
            config.adapter = Some(name);
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, RunnerError> {
        let raw = std::fs::read_to_string(path).map_err(|error| RunnerError::config(path, error))?;
        serde_json::from_str(&raw).map_err(|error| RunnerError::config(path, error))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration loading and override precedence.

    use super::{RunnerConfig, clear_adapter_override, set_adapter_override};
    use crate::errors::RunnerError;
    use serial_test::serial;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file =
            tempfile::NamedTempFile::new().unwrap_or_else(|error| panic!("tempfile: {error}"));
        file.write_all(contents.as_bytes())
            .unwrap_or_else(|error| panic!("write: {error}"));
        file
    }

    #[test]
    #[serial]
    fn explicit_file_provides_adapter_name() {
        clear_adapter_override();
        let file = write_config(r#"{ "adapter": "from-file" }"#);
        let config = RunnerConfig::load(Some(file.path()))
            .unwrap_or_else(|error| panic!("load failed: {error}"));
        assert_eq!(config.adapter(), Some("from-file"));
    }

    #[test]
    #[serial]
    fn unknown_fields_are_tolerated() {
        clear_adapter_override();
        let file = write_config(r#"{ "adapter": "extra", "timeout": 30 }"#);
        let config = RunnerConfig::load(Some(file.path()))
            .unwrap_or_else(|error| panic!("load failed: {error}"));
        assert_eq!(config.adapter(), Some("extra"));
    }

    #[test]
    #[serial]
    fn process_override_outranks_the_file() {
        let file = write_config(r#"{ "adapter": "from-file" }"#);
        set_adapter_override("from-override");
        let config = RunnerConfig::load(Some(file.path()))
            .unwrap_or_else(|error| panic!("load failed: {error}"));
        clear_adapter_override();
        assert_eq!(config.adapter(), Some("from-override"));
    }

    #[test]
    #[serial]
    fn empty_config_resolves_to_no_adapter() {
        clear_adapter_override();
        let file = write_config("{}");
        let config = RunnerConfig::load(Some(file.path()))
            .unwrap_or_else(|error| panic!("load failed: {error}"));
        assert_eq!(config.adapter(), None);
    }

    #[test]
    #[serial]
    fn missing_explicit_path_is_a_config_error() {
        clear_adapter_override();
        let result = RunnerConfig::load(Some(std::path::Path::new(
            "does/not/exist/annosuite.json",
        )));
        assert!(matches!(result, Err(RunnerError::Config { .. })));
    }

    #[test]
    #[serial]
    fn malformed_json_is_a_config_error() {
        clear_adapter_override();
        let file = write_config("{ adapter: nope");
        let result = RunnerConfig::load(Some(file.path()));
        assert!(matches!(result, Err(RunnerError::Config { .. })));
    }
}
