mod app_config;
mod config;
mod feed;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_CATEGORY_ID, DEFAULT_LOG_LEVEL,
    DEFAULT_SITE_URL, DEFAULT_STORAGE_URL,
};
pub use feed::{FeedItem, AVAILABILITY_IN_STOCK};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
