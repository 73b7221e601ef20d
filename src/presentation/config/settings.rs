use std::net::SocketAddr;
use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Absent or blank selects the simulated provider.
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub image_max_tokens: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Loads settings for the environment named by `APP_ENVIRONMENT`
    /// (default `local`).
    pub fn load() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        Self::load_for(environment)
    }

    /// Layers built-in defaults, `appsettings.{environment}` (optional) and
    /// `APP__SECTION__KEY` variables, in increasing precedence. The provider
    /// key may also come from `OPENAI_API_KEY`.
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("provider.base_url", "https://api.openai.com/v1")?
            .set_default("provider.chat_model", "gpt-4o")?
            .set_default("provider.embedding_model", "text-embedding-3-small")?
            .set_default("provider.temperature", 0.7)?
            .set_default("provider.max_tokens", 1000)?
            .set_default("provider.image_max_tokens", 500)?
            .set_default("provider.request_timeout_secs", 60)?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_file_size_mb", 10)?
            .set_default("logging.level", "info,parley=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            builder = builder.set_default("provider.api_key", key)?;
        }

        builder
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .set_override("environment", environment.as_str())?
            .build()?
            .try_deserialize()
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl UploadSettings {
    pub fn max_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }
}

impl ProviderSettings {
    /// Settings for a provider with no credential, i.e. the simulated one.
    pub fn simulated() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            image_max_tokens: 500,
            request_timeout_secs: 60,
        }
    }
}
