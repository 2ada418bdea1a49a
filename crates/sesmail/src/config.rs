//! Client configuration types.

use crate::error::Result;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("sesmail/", env!("CARGO_PKG_VERSION"));

/// Access key and shared secret used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Returns the access key ID.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Service endpoint the raw message is posted to.
    pub endpoint: Url,
    /// Signing credentials.
    pub credentials: Credentials,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Config {
    /// Creates a configuration with no timeout and the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid URL.
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        Self::builder(endpoint, credentials).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>, credentials: Credentials) -> ConfigBuilder {
        ConfigBuilder::new(endpoint, credentials)
    }

    /// Returns the regional endpoint, e.g. `https://email.us-east-1.amazonaws.com/`.
    #[must_use]
    pub fn regional_endpoint(region: &str) -> String {
        format!("https://email.{region}.amazonaws.com/")
    }
}

/// Builder for client configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    endpoint: String,
    credentials: Credentials,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ConfigBuilder {
    /// Creates a new builder for the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials,
            timeout: None,
            user_agent: None,
        }
    }

    /// Sets the whole-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn build(self) -> Result<Config> {
        Ok(Config {
            endpoint: Url::parse(&self.endpoint)?,
            credentials: self.credentials,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}
