use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the database file placed in the home directory by default
pub const DATABASE_FILE_NAME: &str = "netmon.db";

/// Targets checked when neither the config file nor `--url` names any
pub const DEFAULT_URLS: [&str; 4] = [
    "https://www.cloudflare.com/",
    "https://www.google.com/",
    "https://www.amazon.com/",
    "https://www.fastly.com/",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read { path: path::PathBuf, source: std::io::Error },

    #[error("could not write config file {}: {source}", path.display())]
    Write { path: path::PathBuf, source: std::io::Error },

    #[error("invalid config file {}: {source}", path.display())]
    Parse { path: path::PathBuf, source: toml::de::Error },

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no home directory to place {0} in")]
    HomeUnavailable(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: Storage,
    pub probe: Probe,
    pub server: Server,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Database file; `$HOME/netmon.db` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<path::PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Probe {
    pub urls: Vec<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/netmon/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::HomeUnavailable("config.toml"));
    };

    Ok(path.join("netmon/config.toml"))
}

impl Default for Probe {
    fn default() -> Self {
        Self { urls: DEFAULT_URLS.iter().map(|url| url.to_string()).collect(), timeout_seconds: 10 }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self { bind: "127.0.0.1".into() }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        let storage_path = match &self.storage.path {
            Some(path) => path.display().to_string(),
            None => format!("~/{DATABASE_FILE_NAME}"),
        };

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Storage")?;
        write_1(f, "Path", &storage_path)?;
        write_title_1(f, "Probe")?;
        write_1(f, "URLs", &self.probe.urls.join(", "))?;
        write_1(f, "Timeout (s)", &self.probe.timeout_seconds)?;
        write_title_1(f, "Server")?;
        write_1(f, "Bind Address", &self.server.bind)?;

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/netmon/config.toml
    ///  or the specified path, with the name config.toml if one does not exist.
    /// Failing to write that default is not an error; the defaults are
    /// still returned.
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        match optional_path {
            Some(path) => Self::load(Ok(normalize_toml_path(path.as_ref()))),
            None => Self::load(default_config_path()),
        }
    }

    /// Load from `config_path`, falling back to defaults when there is no
    /// location to read from.
    fn load(config_path: Result<path::PathBuf, ConfigError>) -> Result<Self, ConfigError> {
        let config_path = match config_path {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!("Using built-in defaults: {error}");
                return Ok(Self::default());
            }
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| ConfigError::Read { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| ConfigError::Parse { path: config_path, source })
        } else {
            let config = Self::default();
            if let Err(error) = config.write_config(&config_path) {
                tracing::warn!("Using built-in defaults: {error}");
            }
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })?;
        }

        fs::write(path, config_str).map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Location of the result store: the configured path or `$HOME/netmon.db`.
    pub fn database_path(&self) -> Result<path::PathBuf, ConfigError> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        env::home_dir()
            .map(|home| home.join(DATABASE_FILE_NAME))
            .ok_or(ConfigError::HomeUnavailable(DATABASE_FILE_NAME))
    }

    /// Targets for a batch run; a `--url` override replaces the whole list.
    pub fn targets(&self, override_url: Option<&str>) -> Vec<String> {
        match override_url {
            Some(url) if !url.is_empty() => vec![url.to_string()],
            _ => self.probe.urls.clone(),
        }
    }
}
