/// User configuration: stored API keys, current key, default region.
///
/// The file lives at `~/.civo.json` unless `--config` names another path.
/// Fields this CLI does not know about are carried through a load/save cycle
/// untouched, so the file can be shared with other tools.
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::DEFAULT_API_URL;

/// Environment variable that overrides the stored API key.
pub const TOKEN_ENV: &str = "CIVO_TOKEN";

/// File name of the config inside the home directory.
const CONFIG_FILE_NAME: &str = ".civo.json";

/// Errors from reading, writing or interpreting the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("could not determine the home directory, pass --config explicitly")]
    NoHome,

    /// The file exists but could not be read or written.
    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for this schema.
    #[error("config file {} is malformed: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Neither the environment nor the config file provides a key.
    #[error("no API key configured, run `civo apikey save NAME KEY` or set CIVO_TOKEN")]
    NoApiKey,

    /// An API key name that is not stored in the config.
    #[error("no API key named '{name}' in the config")]
    UnknownApiKey { name: String },
}

/// On-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API keys by user-chosen name.
    pub apikeys: BTreeMap<String, String>,
    pub meta: Meta,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// The `meta` section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    /// Name of the entry in `apikeys` used for requests.
    pub current_apikey: String,
    /// Region code used when `--region` is not given.
    pub default_region: String,
    /// API base URL; empty means [`DEFAULT_API_URL`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// The config path to use: the explicit one, or `~/.civo.json`.
///
/// # Errors
///
/// Returns `ConfigError::NoHome` when no path is given and the home directory is unknown.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let dirs = BaseDirs::new().ok_or(ConfigError::NoHome)?;
    Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load the config at `path`. A missing file yields an empty config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and `ConfigError::Parse`
    /// if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    ///
    /// The file holds API keys, so on unix it is readable by its owner only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` on any filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        write_private(path, &(body + "\n")).map_err(io_err)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// The API key to authenticate with. `env_token` (the value of
    /// [`TOKEN_ENV`]) takes precedence over the stored current key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoApiKey` if no key is available.
    pub fn api_key(&self, env_token: Option<String>) -> Result<String, ConfigError> {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            return Ok(token.trim().to_owned());
        }
        self.apikeys
            .get(&self.meta.current_apikey)
            .cloned()
            .ok_or(ConfigError::NoApiKey)
    }

    /// API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        if self.meta.url.is_empty() {
            DEFAULT_API_URL
        } else {
            &self.meta.url
        }
    }

    /// Region from the command line, else the stored default. `None` means the
    /// region still has to be chosen from the API's region list.
    #[must_use]
    pub fn region(&self, flag: Option<&str>) -> Option<String> {
        flag.filter(|r| !r.is_empty())
            .or_else(|| Some(self.meta.default_region.as_str()).filter(|r| !r.is_empty()))
            .map(str::to_owned)
    }

    /// Store `key` under `name` and make it the current key.
    pub fn save_apikey(&mut self, name: &str, key: &str) {
        self.apikeys.insert(name.to_owned(), key.to_owned());
        name.clone_into(&mut self.meta.current_apikey);
    }

    /// Make the stored key `name` current.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownApiKey` if `name` is not stored.
    pub fn use_apikey(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.apikeys.contains_key(name) {
            return Err(ConfigError::UnknownApiKey {
                name: name.to_owned(),
            });
        }
        name.clone_into(&mut self.meta.current_apikey);
        Ok(())
    }

    /// Delete the stored key `name`, clearing the current key if it was this one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownApiKey` if `name` is not stored.
    pub fn remove_apikey(&mut self, name: &str) -> Result<(), ConfigError> {
        if self.apikeys.remove(name).is_none() {
            return Err(ConfigError::UnknownApiKey {
                name: name.to_owned(),
            });
        }
        if self.meta.current_apikey == name {
            self.meta.current_apikey.clear();
        }
        Ok(())
    }
}

/// Write `contents` to `path` with mode 0600, tightening an existing file too.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.save_apikey("work", "stored-key");
        config
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert!(config.apikeys.is_empty());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("civo.json");
        std::fs::write(
            &path,
            r#"{"apikeys":{"a":"k"},"meta":{"current_apikey":"a","admin":true},"region_to_features":{}}"#,
        )
        .unwrap();

        let mut config = Config::load(&path).unwrap();
        config.meta.default_region = "LON1".to_owned();
        config.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["meta"]["admin"], true);
        assert_eq!(raw["meta"]["default_region"], "LON1");
        assert!(raw.get("region_to_features").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("civo.json");
        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode();

        config_with_key().save(&path).unwrap();
        assert_eq!(mode(&path) & 0o077, 0);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        config_with_key().save(&path).unwrap();
        assert_eq!(mode(&path) & 0o077, 0);
        assert_eq!(Config::load(&path).unwrap().apikeys["work"], "stored-key");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("civo.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_token_wins() {
        let config = config_with_key();
        assert_eq!(
            config.api_key(Some("env-key".to_owned())).unwrap(),
            "env-key"
        );
        assert_eq!(config.api_key(Some("  ".to_owned())).unwrap(), "stored-key");
        assert_eq!(config.api_key(None).unwrap(), "stored-key");
    }

    #[test]
    fn test_no_api_key() {
        let config = Config::default();
        assert!(matches!(config.api_key(None), Err(ConfigError::NoApiKey)));
    }

    #[test]
    fn test_region_precedence() {
        let mut config = Config::default();
        assert_eq!(config.region(None), None);
        config.meta.default_region = "LON1".to_owned();
        assert_eq!(config.region(None).as_deref(), Some("LON1"));
        assert_eq!(config.region(Some("NYC1")).as_deref(), Some("NYC1"));
        assert_eq!(config.region(Some("")).as_deref(), Some("LON1"));
    }

    #[test]
    fn test_remove_current_apikey_clears_current() {
        let mut config = config_with_key();
        config.remove_apikey("work").unwrap();
        assert!(config.meta.current_apikey.is_empty());
        assert!(matches!(
            config.use_apikey("work"),
            Err(ConfigError::UnknownApiKey { .. })
        ));
    }
}
