use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paths::{config_json_path, storage_json_path};

const CONFIG_FILE_PATH: &str = "config.toml";
const BACKEND_API_BASE: &str = "https://multi-app-backend.vercel.app/api";

/// Per-attempt network timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

/// Base URLs of one deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentUrls {
    pub base_url: String,
    pub auth_url: String,
    pub todos_url: String,
}

impl Environment {
    pub fn urls(&self) -> EnvironmentUrls {
        // All deployments currently share one backend
        let base = match self {
            Environment::Dev | Environment::Staging | Environment::Prod => BACKEND_API_BASE,
        };
        EnvironmentUrls {
            base_url: base.to_string(),
            auth_url: format!("{base}/auth"),
            todos_url: format!("{base}/todos"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: Environment,
    /// Candidate auth base URLs, in failover order. Empty means the preset.
    #[serde(default)]
    pub auth_urls: Vec<String>,
    /// Candidate todo base URLs, in failover order. Empty means the preset.
    #[serde(default)]
    pub todos_urls: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn parse_url_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            auth_urls: Vec::new(),
            todos_urls: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Load from ~/.multi_app/config.json, else ./config.toml, then apply
    /// environment overrides
    pub fn new() -> Self {
        let mut config = ClientConfig::default();

        let mut loaded = false;
        let json_path = config_json_path();
        if json_path.exists() {
            match std::fs::read_to_string(&json_path) {
                Ok(content) => match serde_json::from_str::<ClientConfig>(&content) {
                    Ok(file_config) => {
                        config = file_config;
                        loaded = true;
                    }
                    Err(e) => log::warn!("Ignoring malformed {}: {}", json_path.display(), e),
                },
                Err(e) => log::warn!("Failed to read {}: {}", json_path.display(), e),
            }
        }

        if !loaded && std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                match toml::from_str::<ClientConfig>(&content) {
                    Ok(file_config) => config = file_config,
                    Err(e) => log::warn!("Ignoring malformed {}: {}", CONFIG_FILE_PATH, e),
                }
            }
        }

        config.apply_env_overrides();
        config.reject_zero_timeout();
        config
    }

    /// A zero timeout fails every attempt at once; keep the default instead
    fn reject_zero_timeout(&mut self) {
        if self.timeout_secs == 0 {
            log::warn!(
                "Ignoring timeout_secs = 0, using {} seconds",
                DEFAULT_TIMEOUT_SECS
            );
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(env) = std::env::var("MULTI_APP_ENV") {
            match env.parse() {
                Ok(environment) => self.environment = environment,
                Err(e) => log::warn!("Ignoring MULTI_APP_ENV: {}", e),
            }
        }
        if let Ok(urls) = std::env::var("MULTI_APP_AUTH_URLS") {
            self.auth_urls = parse_url_list(&urls);
        }
        if let Ok(urls) = std::env::var("MULTI_APP_TODOS_URLS") {
            self.todos_urls = parse_url_list(&urls);
        }
        if let Ok(timeout) = std::env::var("MULTI_APP_TIMEOUT_SECS") {
            match timeout.trim().parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(e) => log::warn!("Ignoring MULTI_APP_TIMEOUT_SECS: {}", e),
            }
        }
        if let Ok(path) = std::env::var("MULTI_APP_STORAGE_PATH") {
            self.storage_path = Some(PathBuf::from(path));
        }
    }

    pub fn auth_candidates(&self) -> Vec<String> {
        if self.auth_urls.is_empty() {
            vec![self.environment.urls().auth_url]
        } else {
            self.auth_urls.clone()
        }
    }

    pub fn todos_candidates(&self) -> Vec<String> {
        if self.todos_urls.is_empty() {
            vec![self.environment.urls().todos_url]
        } else {
            self.todos_urls.clone()
        }
    }

    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    pub fn storage_file(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(storage_json_path)
    }
}
