//! Configuration management for `pmdash`.
//!
//! Configuration is layered, later layers winning:
//! - Built-in defaults
//! - User config (`$XDG_CONFIG_HOME/pmdash/config.yaml`, else
//!   `~/.config/pmdash/config.yaml`)
//! - An explicit `--config` file
//! - Environment variables (`PMDASH_*`, `NO_COLOR`)
//! - CLI flags
//!
//! A missing file is skipped. A file that exists but does not parse is an
//! error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Releases shown per page unless configured otherwise.
pub const DEFAULT_RELEASES_PER_PAGE: usize = 5;

pub const ENV_CURRENT_USER: &str = "PMDASH_CURRENT_USER";
pub const ENV_SEED: &str = "PMDASH_SEED";
pub const ENV_PAGE_SIZE: &str = "PMDASH_PAGE_SIZE";
pub const ENV_LOG_FILE: &str = "PMDASH_LOG_FILE";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Effective configuration after all layers are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Person id used for "my issues" and the profile.
    pub current_user: Option<String>,
    /// JSON seed document; the built-in seed when unset.
    pub seed_path: Option<PathBuf>,
    pub releases_per_page: usize,
    pub color: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_user: None,
            seed_path: None,
            releases_per_page: DEFAULT_RELEASES_PER_PAGE,
            color: true,
            log_file: None,
        }
    }
}

/// One YAML file's worth of settings. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub current_user: Option<String>,
    pub seed_path: Option<PathBuf>,
    pub releases_per_page: Option<usize>,
    pub color: Option<bool>,
    pub log_file: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub seed_path: Option<PathBuf>,
    pub current_user: Option<String>,
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed,
    /// if `--config` names a missing file, or if an environment value is
    /// invalid.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration with an injectable environment lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env(
        overrides: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = user_config_path(&env) {
            if let Some(file) = ConfigFile::read(&path)? {
                config.merge_file(file, &path);
            }
        }

        if let Some(path) = &overrides.config_path {
            let file = ConfigFile::read(path)?.ok_or_else(|| ConfigError::Missing(path.clone()))?;
            config.merge_file(file, path);
        }

        config.merge_env(&env)?;
        config.merge_cli(overrides);

        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    fn merge_file(&mut self, file: ConfigFile, path: &Path) {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(user) = file.current_user {
            self.current_user = Some(user);
        }
        if let Some(seed) = file.seed_path {
            self.seed_path = Some(resolve_relative(base, seed));
        }
        if let Some(size) = file.releases_per_page {
            self.releases_per_page = size.max(1);
        }
        if let Some(color) = file.color {
            self.color = color;
        }
        if let Some(log) = file.log_file {
            self.log_file = Some(resolve_relative(base, log));
        }
    }

    fn merge_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(user) = non_empty(env(ENV_CURRENT_USER)) {
            self.current_user = Some(user);
        }
        if let Some(seed) = non_empty(env(ENV_SEED)) {
            self.seed_path = Some(PathBuf::from(seed));
        }
        if let Some(raw) = non_empty(env(ENV_PAGE_SIZE)) {
            let size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_PAGE_SIZE,
                    value: raw,
                })?;
            self.releases_per_page = size;
        }
        if let Some(log) = non_empty(env(ENV_LOG_FILE)) {
            self.log_file = Some(PathBuf::from(log));
        }
        if env(ENV_NO_COLOR).is_some_and(|value| !value.is_empty()) {
            self.color = false;
        }
        Ok(())
    }

    fn merge_cli(&mut self, overrides: &CliOverrides) {
        if let Some(seed) = &overrides.seed_path {
            self.seed_path = Some(seed.clone());
        }
        if let Some(user) = &overrides.current_user {
            self.current_user = Some(user.clone());
        }
    }
}

impl ConfigFile {
    /// Read and parse one YAML file. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Some(Self::default()));
        }

        let file = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(Some(file))
    }
}

/// `$XDG_CONFIG_HOME/pmdash/config.yaml`, falling back to
/// `$HOME/.config/pmdash/config.yaml`.
fn user_config_path(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let root = non_empty(env("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty(env("HOME")).map(|home| Path::new(&home).join(".config")))?;
    Some(root.join("pmdash").join("config.yaml"))
}

/// Paths inside a config file are relative to that file's directory.
fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    let base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
    base.join(path)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_any_layer() {
        let config = Config::load_with_env(&CliOverrides::default(), env_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.releases_per_page, 5);
        assert!(config.color);
    }

    #[test]
    fn test_user_config_from_xdg() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pmdash/config.yaml",
            "current_user: abc\nreleases_per_page: 3\ncolor: false\n",
        );
        let xdg = dir.path().to_string_lossy().to_string();
        let config =
            Config::load_with_env(&CliOverrides::default(), env_from(&[("XDG_CONFIG_HOME", xdg.as_str())]))
                .unwrap();
        assert_eq!(config.current_user.as_deref(), Some("abc"));
        assert_eq!(config.releases_per_page, 3);
        assert!(!config.color);
    }

    #[test]
    fn test_user_config_from_home() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".config/pmdash/config.yaml", "current_user: from-home\n");
        let home = dir.path().to_string_lossy().to_string();
        let config =
            Config::load_with_env(&CliOverrides::default(), env_from(&[("HOME", home.as_str())])).unwrap();
        assert_eq!(config.current_user.as_deref(), Some("from-home"));
    }

    #[test]
    fn test_layer_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "xdg/pmdash/config.yaml",
            "current_user: user-layer\nreleases_per_page: 2\n",
        );
        let explicit = write(dir.path(), "explicit.yaml", "current_user: explicit-layer\n");
        let xdg = dir.path().join("xdg").to_string_lossy().to_string();

        let overrides = CliOverrides {
            config_path: Some(explicit.clone()),
            ..CliOverrides::default()
        };
        let config =
            Config::load_with_env(&overrides, env_from(&[("XDG_CONFIG_HOME", xdg.as_str())])).unwrap();
        assert_eq!(config.current_user.as_deref(), Some("explicit-layer"));
        assert_eq!(config.releases_per_page, 2);

        let config = Config::load_with_env(
            &overrides,
            env_from(&[
                ("XDG_CONFIG_HOME", xdg.as_str()),
                (ENV_CURRENT_USER, "env-layer"),
                (ENV_PAGE_SIZE, "7"),
            ]),
        )
        .unwrap();
        assert_eq!(config.current_user.as_deref(), Some("env-layer"));
        assert_eq!(config.releases_per_page, 7);

        let overrides = CliOverrides {
            config_path: Some(explicit),
            current_user: Some("cli-layer".to_string()),
            ..CliOverrides::default()
        };
        let config = Config::load_with_env(
            &overrides,
            env_from(&[("XDG_CONFIG_HOME", xdg.as_str()), (ENV_CURRENT_USER, "env-layer")]),
        )
        .unwrap();
        assert_eq!(config.current_user.as_deref(), Some("cli-layer"));
    }

    #[test]
    fn test_seed_path_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "conf/pmd.yaml", "seed_path: data/seed.json\n");
        let overrides = CliOverrides {
            config_path: Some(explicit),
            ..CliOverrides::default()
        };
        let config = Config::load_with_env(&overrides, env_from(&[])).unwrap();
        let seed = config.seed_path.unwrap();
        assert!(seed.is_absolute());
        assert!(seed.ends_with("conf/data/seed.json"));
    }

    #[test]
    fn test_cli_seed_beats_env_seed() {
        let overrides = CliOverrides {
            seed_path: Some(PathBuf::from("cli.json")),
            ..CliOverrides::default()
        };
        let config =
            Config::load_with_env(&overrides, env_from(&[(ENV_SEED, "env.json")])).unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("cli.json")));
    }

    #[test]
    fn test_missing_user_config_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = dir.path().to_string_lossy().to_string();
        let config =
            Config::load_with_env(&CliOverrides::default(), env_from(&[("XDG_CONFIG_HOME", xdg.as_str())]))
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CliOverrides {
            config_path: Some(dir.path().join("absent.yaml")),
            ..CliOverrides::default()
        };
        let err = Config::load_with_env(&overrides, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "bad.yaml", "releases_per_page: [not, a, number]\n");
        let overrides = CliOverrides {
            config_path: Some(explicit),
            ..CliOverrides::default()
        };
        let err = Config::load_with_env(&overrides, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "typo.yaml", "curent_user: x\n");
        let overrides = CliOverrides {
            config_path: Some(explicit),
            ..CliOverrides::default()
        };
        assert!(Config::load_with_env(&overrides, env_from(&[])).is_err());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "empty.yaml", "\n");
        let overrides = CliOverrides {
            config_path: Some(explicit),
            ..CliOverrides::default()
        };
        let config = Config::load_with_env(&overrides, env_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_page_size_env() {
        let err = Config::load_with_env(
            &CliOverrides::default(),
            env_from(&[(ENV_PAGE_SIZE, "zero")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains(ENV_PAGE_SIZE));

        assert!(
            Config::load_with_env(&CliOverrides::default(), env_from(&[(ENV_PAGE_SIZE, "0")]))
                .is_err()
        );
    }

    #[test]
    fn test_zero_page_size_in_file_clamps_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "zero.yaml", "releases_per_page: 0\n");
        let overrides = CliOverrides {
            config_path: Some(explicit),
            ..CliOverrides::default()
        };
        let config = Config::load_with_env(&overrides, env_from(&[])).unwrap();
        assert_eq!(config.releases_per_page, 1);
    }

    #[test]
    fn test_no_color_env() {
        let config =
            Config::load_with_env(&CliOverrides::default(), env_from(&[(ENV_NO_COLOR, "1")]))
                .unwrap();
        assert!(!config.color);

        let config =
            Config::load_with_env(&CliOverrides::default(), env_from(&[(ENV_NO_COLOR, "")]))
                .unwrap();
        assert!(config.color);
    }
}
