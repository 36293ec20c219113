use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, SERVER_URL_ENV};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Client configuration wrapper.
///
/// Wraps [`AppConfig`] with the bearer token handed over by the auth layer.
/// Token acquisition and refresh are the caller's concern.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    app: AppConfig,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let app = match std::env::var(SERVER_URL_ENV) {
            Ok(url) => AppConfig::builder().server_url(url).build().ok(),
            Err(_) => AppConfig::load_default().ok(),
        }
        .unwrap_or_default();
        Self { app, token: None }
    }
}

impl ClientConfig {
    /// Create a new configuration from the environment and config file
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app, token: None })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}
