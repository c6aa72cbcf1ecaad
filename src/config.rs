//! Runtime settings read from the environment.
//!
//! An optional `.env` file in the working directory is loaded first, so
//! project-local overrides work without exporting variables.

use std::path::PathBuf;

use crate::error::{GonectrError, Result};

/// Environment variable naming the host Go toolchain binary.
pub const ENV_GO: &str = "GONECTR_GO";
/// Environment variable naming the mock generator binary.
pub const ENV_MOCKGEN: &str = "GONECTR_MOCKGEN";
/// Environment variable naming the program used for self-invocation.
pub const ENV_GENERATOR: &str = "GONECTR_GENERATOR";
/// Environment variable naming the command token matched in directive lines.
pub const ENV_NAME: &str = "GONECTR_NAME";
/// Environment variable pointing at a directory to record cassettes into.
pub const ENV_RECORD: &str = "GONECTR_RECORD";
/// Environment variable selecting the log level.
pub const ENV_LOG: &str = "GONECTR_LOG";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host toolchain binary (`go`).
    pub go: String,
    /// Mock generator binary (`mockgen`).
    pub mockgen: String,
    /// Gone generator invoked as `<generator> generate -s=... -m=...`.
    ///
    /// Unset by default; only module builds without a directive need it.
    pub generator: Option<String>,
    /// Command token expected after `//go:generate`.
    pub generator_name: String,
    /// When set, port interactions are recorded into this directory.
    pub record_dir: Option<PathBuf>,
    /// Log level name.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            mockgen: "mockgen".to_string(),
            generator: None,
            generator_name: "gonectr".to_string(),
            record_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads `.env` (if present) and reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            go: get(ENV_GO).unwrap_or(defaults.go),
            mockgen: get(ENV_MOCKGEN).unwrap_or(defaults.mockgen),
            generator: get(ENV_GENERATOR),
            generator_name: get(ENV_NAME).unwrap_or(defaults.generator_name),
            record_dir: get(ENV_RECORD).map(PathBuf::from),
            log_level: get(ENV_LOG).unwrap_or(defaults.log_level),
        }
    }

    /// Returns the configured gone generator.
    ///
    /// # Errors
    ///
    /// Returns [`GonectrError::InvalidArgument`] naming `GONECTR_GENERATOR`
    /// when it is not set.
    pub fn require_generator(&self) -> Result<&str> {
        self.generator.as_deref().ok_or_else(|| {
            GonectrError::InvalidArgument(format!(
                "{ENV_GENERATOR} is not set; point it at the gone generator \
                 (the program that implements `generate -s=<module> -m=<main>`)"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.go, "go");
        assert_eq!(settings.mockgen, "mockgen");
        assert_eq!(settings.generator_name, "gonectr");
        assert_eq!(settings.record_dir, None);
        assert_eq!(settings.generator, None);
        assert!(matches!(
            settings.require_generator(),
            Err(GonectrError::InvalidArgument(ref m)) if m.contains(ENV_GENERATOR)
        ));
    }

    #[test]
    fn variables_override_defaults() {
        let env: HashMap<&str, &str> = [
            (ENV_GO, "/opt/go/bin/go"),
            (ENV_MOCKGEN, "/usr/local/bin/mockgen"),
            (ENV_GENERATOR, "/opt/gone/bin/gonectr"),
            (ENV_RECORD, "/tmp/cassettes"),
            (ENV_LOG, ""),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(settings.go, "/opt/go/bin/go");
        assert_eq!(settings.mockgen, "/usr/local/bin/mockgen");
        assert_eq!(settings.record_dir, Some(PathBuf::from("/tmp/cassettes")));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.require_generator().unwrap(), "/opt/gone/bin/gonectr");
    }
}
