pub mod app_config;
pub mod config;
pub mod products;
pub mod request;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{PageInfo, Product, ProductPage};
pub use request::{Facet, FetchRequest, ParseSortKeyError, SortKey, SourceMode, DEFAULT_PAGE_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
