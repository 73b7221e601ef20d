mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CorsSettings, LoggingSettings, ProviderSettings, ServerSettings, Settings, UploadSettings,
};
