#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the primary product store (the storefront's own API).
    pub primary_base_url: String,
    /// Base URL of the fallback document store.
    pub fallback_base_url: String,
    pub fallback_api_key: Option<String>,
    /// Bearer token presented to the primary store, if a user is signed in.
    pub auth_token: Option<String>,
    pub auth_user: Option<String>,
    /// Applied uniformly to both stores.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
    /// Route anonymous listing requests straight to the fallback store.
    pub skip_primary_when_anonymous: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("primary_base_url", &self.primary_base_url)
            .field("fallback_base_url", &self.fallback_base_url)
            .field(
                "fallback_api_key",
                &self.fallback_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("auth_user", &self.auth_user)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field(
                "skip_primary_when_anonymous",
                &self.skip_primary_when_anonymous,
            )
            .finish()
    }
}
