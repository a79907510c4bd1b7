pub mod auth;
pub mod classify;
pub mod controller;
pub mod error;
pub mod fallback;
mod http;
pub mod primary;
pub mod source;
pub mod types;

pub use auth::{provider_from_config, Anonymous, AuthProvider, Identity, StaticIdentity};
pub use classify::{classify, RawFailure};
pub use controller::{AcquisitionController, AcquisitionState, ControllerOptions, FetchOutcome, Phase};
pub use error::{CatalogError, ClassifiedError, ErrorKind};
pub use fallback::FallbackStoreClient;
pub use primary::PrimaryStoreClient;
pub use source::{AcquisitionResult, DataSource};

/// Controller wired to the two HTTP stores.
pub type StoreController = AcquisitionController<PrimaryStoreClient, FallbackStoreClient>;

/// Builds both store clients and the controller from application config.
///
/// # Errors
///
/// Returns [`CatalogError`] if either base URL is invalid or an HTTP client
/// cannot be constructed.
pub fn build_store_controller(
    config: &storefront_core::AppConfig,
) -> Result<StoreController, CatalogError> {
    let auth = provider_from_config(config);
    let primary = PrimaryStoreClient::new(
        &config.primary_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        std::sync::Arc::clone(&auth),
    )?;
    let fallback = FallbackStoreClient::new(
        &config.fallback_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.fallback_api_key.as_deref(),
    )?;
    Ok(
        AcquisitionController::new(primary, fallback, auth).with_options(ControllerOptions {
            skip_primary_when_anonymous: config.skip_primary_when_anonymous,
        }),
    )
}
