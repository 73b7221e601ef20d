use crate::presentation::config::Settings;

const DEFAULT_DIRECTIVES: &str = "info,parley=debug,tower_http=debug";

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter used when `RUST_LOG` is not set.
    pub default_directives: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            environment: settings.environment.to_string(),
            json_format: settings.logging.enable_json,
            default_directives: settings.logging.level.clone(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_directives: DEFAULT_DIRECTIVES.to_string(),
        }
    }
}
