pub mod app_config;
pub mod categories;
pub mod config;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, ScrapeTimings};
pub use categories::{load_categories, CategoriesFile, CategoryConfig, RunMode};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    ProductRecord, CAPTURED_AT_FORMAT, NO_NAME, NO_PROMOTION, NO_PROMOTION_DATE, NO_URL,
    NO_WEIGHT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid categories config: {0}")]
    Validation(String),
}
