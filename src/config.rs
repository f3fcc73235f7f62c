use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default = "default_datadir")]
    pub datadir: String,
    #[serde(default = "default_public_url")]
    pub publicurl: String,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    #[serde(alias = "apiKey", default = "default_api_key")]
    pub apikey: String,
    #[serde(alias = "baseUrl", default = "default_omdb_url")]
    pub baseurl: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            apikey: default_api_key(),
            baseurl: default_omdb_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            appdir: None,
            datadir: default_datadir(),
            publicurl: default_public_url(),
            omdb: OmdbConfig::default(),
            debug_logs: false,
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_datadir() -> String {
    "./data".to_string()
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_api_key() -> String {
    "YOUR_API_KEY_HERE".to_string()
}

fn default_omdb_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    /// Read the config file if one was given, otherwise use defaults.
    /// Environment variables are applied on top in both cases.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = get("OMDB_API_KEY") {
            self.omdb.apikey = key;
        }
        if let Some(url) = get("OMDB_BASE_URL") {
            self.omdb.baseurl = url;
        }
        if let Some(url) = get("NEXT_PUBLIC_API_URL") {
            self.publicurl = url;
        }
        if let Some(port) = get("PORT") {
            self.listen.port = port;
        }
    }

    pub fn favorites_path(&self) -> PathBuf {
        PathBuf::from(&self.datadir).join(crate::favorites::FAVORITES_FILE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
