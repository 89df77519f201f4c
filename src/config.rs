//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `MEDPREDICT_MODEL_DIR` | `models` |
//! | `MEDPREDICT_DIABETES_MODEL` | `<dir>/diabetes.json` |
//! | `MEDPREDICT_HEART_MODEL` | `<dir>/heart.json` |
//! | `MEDPREDICT_PARKINSONS_MODEL` | `<dir>/parkinsons.json` |
//! | `MEDPREDICT_REQUIRE_MANIFEST` | `false` |
//! | `MEDPREDICT_LOG_MODE` | `auto` (`file` \| `stdout`) |
//! | `MEDPREDICT_LOG_FILE` | `medpredict.log` |
//!
//! Log verbosity itself comes from `RUST_LOG`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::Disease;
use crate::PredictorError;

const ENV_PREFIX: &str = "MEDPREDICT";

/// Where the disease model artifacts live.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub dir: PathBuf,
    pub overrides: HashMap<Disease, PathBuf>,
    pub require_manifest: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            overrides: HashMap::new(),
            require_manifest: false,
        }
    }
}

impl ModelConfig {
    /// Use `dir` for every disease, with no overrides.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Artifact location for `disease`.
    #[must_use]
    pub fn path_for(&self, disease: Disease) -> PathBuf {
        self.overrides
            .get(&disease)
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{}.json", disease.key())))
    }
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise.
    Auto,
    File,
    Stdout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::Auto,
            file: PathBuf::from("medpredict.log"),
        }
    }
}

impl LogConfig {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self.mode {
            LogMode::File => true,
            LogMode::Stdout => false,
            LogMode::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub models: ModelConfig,
    pub logging: LogConfig,
}

fn var_name(suffix: &str) -> String {
    format!("{ENV_PREFIX}_{suffix}")
}

fn parse_bool(name: &str, value: &str) -> Result<bool, PredictorError> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" | "" => Ok(false),
        other => Err(PredictorError::Config(format!(
            "{name} must be a boolean, got {other:?}"
        ))),
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `PredictorError::Config` on malformed values.
    pub fn from_env() -> Result<Self, PredictorError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `PredictorError::Config` on malformed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PredictorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(dir) = lookup(&var_name("MODEL_DIR")).filter(|v| !v.trim().is_empty()) {
            config.models.dir = PathBuf::from(dir);
        }

        for disease in Disease::ALL {
            let name = var_name(&format!("{}_MODEL", disease.key().to_uppercase()));
            if let Some(path) = lookup(&name).filter(|v| !v.trim().is_empty()) {
                config.models.overrides.insert(disease, PathBuf::from(path));
            }
        }

        let name = var_name("REQUIRE_MANIFEST");
        if let Some(v) = lookup(&name) {
            config.models.require_manifest = parse_bool(&name, &v)?;
        }

        let name = var_name("LOG_MODE");
        if let Some(v) = lookup(&name) {
            config.logging.mode = match v.trim() {
                "" | "auto" => LogMode::Auto,
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                other => {
                    return Err(PredictorError::Config(format!(
                        "{name} must be auto, file or stdout, got {other:?}"
                    )))
                }
            };
        }

        if let Some(file) = lookup(&var_name("LOG_FILE")).filter(|v| !v.trim().is_empty()) {
            config.logging.file = PathBuf::from(file);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).expect("Should parse");
        assert_eq!(config, Config::default());
        assert_eq!(
            config.models.path_for(Disease::HeartDisease),
            PathBuf::from("models/heart.json")
        );
        assert!(!config.models.require_manifest);
        assert_eq!(config.logging.mode, LogMode::Auto);
    }

    #[test]
    fn test_dir_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MEDPREDICT_MODEL_DIR", "/opt/models"),
            ("MEDPREDICT_PARKINSONS_MODEL", "/srv/pd.json"),
            ("MEDPREDICT_REQUIRE_MANIFEST", "yes"),
        ]))
        .expect("Should parse");

        assert_eq!(
            config.models.path_for(Disease::Diabetes),
            PathBuf::from("/opt/models/diabetes.json")
        );
        assert_eq!(
            config.models.path_for(Disease::Parkinsons),
            PathBuf::from("/srv/pd.json")
        );
        assert!(config.models.require_manifest);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("MEDPREDICT_REQUIRE_MANIFEST", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MEDPREDICT_LOG_MODE", "syslog")])).is_err());
    }

    #[test]
    fn test_log_mode_resolution() {
        let mut logging = LogConfig::default();
        assert!(logging.use_file(true));
        assert!(!logging.use_file(false));

        logging.mode = LogMode::Stdout;
        assert!(!logging.use_file(true));

        logging.mode = LogMode::File;
        assert!(logging.use_file(false));
    }
}
