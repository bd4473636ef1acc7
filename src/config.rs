use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CrmConfig {
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct PartialCrmConfig {
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub log_dir: Option<String>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl PartialCrmConfig {
    /// Reads `path` when it exists; a missing file yields an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))
    }

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(raw) => Some(
                raw.parse()
                    .map_err(|e| format!("MAX_CONNECTIONS must be a positive integer: {e}"))?,
            ),
            None => None,
        };
        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            max_connections,
            log_dir: lookup("LOG_DIR"),
        })
    }
}

impl CrmConfig {
    /// `.env`, then the optional TOML file, then environment variables, with
    /// the environment taking precedence over the file.
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        let file_config = match config_path {
            Some(path) => PartialCrmConfig::from_file(Path::new(path))?,
            None => PartialCrmConfig::default(),
        };
        let env_config = PartialCrmConfig::from_env()?;

        Self::merge(env_config, file_config)
    }

    pub fn merge(env_config: PartialCrmConfig, file_config: PartialCrmConfig) -> Result<Self, String> {
        let max_connections = env_config
            .max_connections
            .or(file_config.max_connections)
            .unwrap_or_else(default_max_connections);
        if max_connections == 0 {
            return Err("max_connections must be at least 1".to_string());
        }

        Ok(CrmConfig {
            database_url: env_config
                .database_url
                .or(file_config.database_url)
                .ok_or("DATABASE_URL is required")?,
            max_connections,
            log_dir: env_config
                .log_dir
                .or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
        })
    }
}
