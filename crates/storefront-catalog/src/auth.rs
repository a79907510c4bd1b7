//! Authentication seam used by the primary store client and the controller.
//!
//! Token issuance and verification live elsewhere; this module only answers
//! "who is signed in right now, and with which bearer token".

use std::fmt;
use std::sync::Arc;

use storefront_core::AppConfig;

#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    token: String,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("token", &"[redacted]")
            .finish()
    }
}

pub trait AuthProvider: Send + Sync {
    /// The signed-in identity, or `None` for an anonymous shopper.
    fn current_identity(&self) -> Option<Identity>;
}

/// No one is signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthProvider for Anonymous {
    fn current_identity(&self) -> Option<Identity> {
        None
    }
}

/// A fixed identity, e.g. a token supplied through configuration.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    identity: Identity,
}

impl StaticIdentity {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

impl AuthProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        Some(self.identity.clone())
    }
}

/// Builds the provider described by `STOREFRONT_AUTH_TOKEN` / `STOREFRONT_AUTH_USER`.
#[must_use]
pub fn provider_from_config(config: &AppConfig) -> Arc<dyn AuthProvider> {
    match config.auth_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => {
            let user = config.auth_user.as_deref().unwrap_or("configured-user");
            Arc::new(StaticIdentity::new(Identity::new(user, token)))
        }
        _ => Arc::new(Anonymous),
    }
}
