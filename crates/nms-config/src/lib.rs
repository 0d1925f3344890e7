use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Connection to the orchestrator REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, including the API version prefix
    pub base_url: String,

    /// Transport timeout per request. No timeout when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// PEM client certificate presented to the orchestrator
    #[serde(default)]
    pub client_cert_path: Option<String>,

    /// PEM private key matching `client_cert_path`
    #[serde(default)]
    pub client_key_path: Option<String>,

    /// PEM bundle of extra trusted roots
    #[serde(default)]
    pub ca_cert_path: Option<String>,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON formatted logs
    pub json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:9443/magma/v1".to_string(),
            request_timeout_secs: None,
            client_cert_path: None,
            client_key_path: None,
            ca_cert_path: None,
            accept_invalid_certs: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    pub fn load(config_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_dir = config_dir.as_ref();
        let s = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::File::with_name(&config_dir.join("default.yaml").to_string_lossy())
                    .required(false),
            )
            // Per-operator overrides, kept out of version control
            .add_source(
                config::File::with_name(&config_dir.join("local.yaml").to_string_lossy())
                    .required(false),
            )
            // Add environment variables (NMS_API__BASE_URL=https://host/magma/v1)
            .add_source(
                config::Environment::with_prefix("NMS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config = s.try_deserialize()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
