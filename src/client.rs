//! The top-level client for the OCS API.
use std::env;

use crate::{
    error::{Error, Result},
    http, users,
};

/// Environment variable holding the server URL.
pub const ENV_URL: &str = "NEXTCLOUD_URL";
/// Environment variable holding the login name.
pub const ENV_USERNAME: &str = "NEXTCLOUD_USERNAME";
/// Environment variable holding the app password.
pub const ENV_TOKEN: &str = "NEXTCLOUD_TOKEN";

/// The client is the entrypoint of the whole SDK.
///
/// You can create it using [`Client::builder`] or [`Client::new`].
///
/// # Examples
/// ```no_run
/// use ocs_rs::{Client, Error};
///
/// fn main() -> Result<(), Error> {
///     // Create a new client and get the URL, username and token from the
///     // environment variables NEXTCLOUD_URL, NEXTCLOUD_USERNAME and
///     // NEXTCLOUD_TOKEN.
///     let client = Client::new()?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables.
///     let client = Client::builder()
///         .with_url("https://cloud.example.com")
///         .with_username("alice")
///         .with_token("my-app-password")
///         .build()?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
    users: users::Client,
}

impl Client {
    /// Creates a new client. If you want to configure it, use [`Client::builder`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Get the base url of the server.
    pub fn url(&self) -> String {
        self.http_client.base_url().to_string()
    }

    /// Get client version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// User profile operations.
    pub fn users(&self) -> &users::Client {
        &self.users
    }
}

/// This builder is used to create a new client.
#[derive(Debug)]
pub struct Builder {
    env_fallback: bool,
    url: Option<String>,
    username: Option<String>,
    token: Option<String>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            url: None,
            username: None,
            token: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Add the server URL. If this is not set, it will be read from the
    /// environment variable `NEXTCLOUD_URL`.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add the login name. If this is not set, it will be read from the
    /// environment variable `NEXTCLOUD_USERNAME`.
    pub fn with_username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Add an app password (or the account password). If this is not set,
    /// it will be read from the environment variable `NEXTCLOUD_TOKEN`.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    fn resolve(&self, value: &Option<String>, var: &str) -> String {
        let mut value = value.clone().unwrap_or_default();
        if value.is_empty() && self.env_fallback {
            value = env::var(var).unwrap_or_default();
        }
        value
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let url = self.resolve(&self.url, ENV_URL);
        if url.is_empty() {
            return Err(Error::MissingUrl);
        }

        let username = self.resolve(&self.username, ENV_USERNAME);
        if username.is_empty() {
            return Err(Error::MissingUsername);
        }

        let token = self.resolve(&self.token, ENV_TOKEN);
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let http_client = http::Client::new(url, username, token)?;

        Ok(Client {
            users: users::Client::new(http_client.clone()),
            http_client,
        })
    }
}
