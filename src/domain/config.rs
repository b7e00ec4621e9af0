use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::KeyPolicy;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configuration file could not be written.
    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Configuration for the course planner.
///
/// Controls where courses are loaded from by default and how the catalog
/// keys identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The course source loaded when no path is given.
    default_file: PathBuf,

    /// How identifiers are keyed on insert.
    key_policy: KeyPolicy,

    /// Whether to log a warning for every prerequisite that does not resolve
    /// to a loaded course.
    pub warn_dangling_prerequisites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            key_policy: KeyPolicy::default(),
            warn_dangling_prerequisites: false,
        }
    }
}

impl Config {
    /// The file name looked up in the working directory when no config path
    /// is given.
    pub const FILE_NAME: &'static str = "planner.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration, falling back to defaults if the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The course source loaded when no path is given.
    #[must_use]
    pub fn default_file(&self) -> &Path {
        &self.default_file
    }

    /// Sets the default course source.
    pub fn set_default_file(&mut self, path: PathBuf) {
        self.default_file = path;
    }

    /// How the catalog keys course identifiers.
    #[must_use]
    pub const fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    /// Sets the key policy.
    pub const fn set_key_policy(&mut self, policy: KeyPolicy) {
        self.key_policy = policy;
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(crate::storage::DEFAULT_FILE)
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_file")]
        default_file: PathBuf,

        #[serde(default)]
        key_policy: KeyPolicy,

        #[serde(default)]
        warn_dangling_prerequisites: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_file,
                key_policy,
                warn_dangling_prerequisites,
            } => Self {
                default_file,
                key_policy,
                warn_dangling_prerequisites,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_file: config.default_file,
            key_policy: config.key_policy,
            warn_dangling_prerequisites: config.warn_dangling_prerequisites,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ndefault_file = \"courses.csv\"\nkey_policy = \"uppercase\"\nwarn_dangling_prerequisites = true\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.default_file(), Path::new("courses.csv"));
        assert_eq!(config.key_policy(), KeyPolicy::Uppercase);
        assert!(config.warn_dangling_prerequisites);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().starts_with("failed to read config file"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join(Config::FILE_NAME);

        let config = Config::load_or_default(&missing).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nkey_policy = \"lowercase\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(
            actual.default_file(),
            Path::new("ABCU_Advising_Program_Input.csv")
        );
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);

        let mut config = Config::default();
        config.set_key_policy(KeyPolicy::Uppercase);
        config.set_default_file(PathBuf::from("spring.csv"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
