//! Relay configuration settings

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{RelayError, RelayResult};

/// Environment variable that overrides the `--config` flag
pub const CONFIG_PATH_ENV: &str = "ORACLE_RELAY_CONFIG";

/// Config file used when neither the flag nor the environment names one
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix for per-key environment overrides, e.g. `ORACLE_RELAY__SERVER__PORT`
const ENV_PREFIX: &str = "ORACLE_RELAY";

/// Main relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub paths: PathSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub chain: ChainSettings,
}

/// Files holding the relay's state and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    /// Offset checkpoint file, must be pre-seeded (e.g. with `0`)
    pub offset_path: String,
    /// Wallet import format secret
    pub wallet_path: String,
    /// PEM-encoded PKCS#1 RSA private key
    pub rsa_key_path: String,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Address to bind, `host:port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chain streaming parameters handed to the host
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    /// Node API endpoint the host streams blocks from
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// First block of the stream, passed through to the host streamer
    #[serde(default)]
    pub start_block: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8888".to_string()
}

impl Default for ChainSettings {
    fn default() -> Self {
        ChainSettings {
            endpoint: default_endpoint(),
            start_block: 0,
        }
    }
}

impl Settings {
    /// Load settings from a config file, which must exist, and the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> RelayResult<Self> {
        let settings: Settings = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("chain.endpoint", default_endpoint())?
            .set_default("chain.start_block", 0)?
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that every required path is set
    pub fn validate(&self) -> RelayResult<()> {
        let required = [
            ("paths.offset_path", &self.paths.offset_path),
            ("paths.wallet_path", &self.paths.wallet_path),
            ("paths.rsa_key_path", &self.paths.rsa_key_path),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(RelayError::ConfigError(format!("{} must not be empty", key)));
            }
        }

        Ok(())
    }
}

/// Pick the config file: the environment wins over the `--config` flag,
/// which wins over the default
pub fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_config_path_with(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from), flag)
}

fn resolve_config_path_with(env: Option<PathBuf>, flag: Option<PathBuf>) -> PathBuf {
    env.or(flag)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
