//! Runtime configuration for the signup endpoint.
//! The bearer token is a secret: it is held as a [`SecretString`] and never
//! shows up in `Debug` output or logs.

use super::debounce::DEFAULT_DEBOUNCE;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct SignupConfig {
    signup_url: Url,
    auth_token: SecretString,
    debounce: Duration,
}

impl SignupConfig {
    /// Build a configuration from a signup URL and bearer token.
    ///
    /// # Errors
    /// Returns an error if `signup_url` cannot be parsed, has no host, or is
    /// not `http`/`https`.
    pub fn new(signup_url: &str, auth_token: SecretString) -> Result<Self> {
        let signup_url = Url::parse(signup_url.trim())
            .with_context(|| format!("Error parsing signup URL: {signup_url}"))?;

        match signup_url.scheme() {
            "http" | "https" => {}
            scheme => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        }

        if signup_url.host().is_none() {
            return Err(anyhow!("Error parsing URL: no host specified"));
        }

        Ok(Self {
            signup_url,
            auth_token,
            debounce: DEFAULT_DEBOUNCE,
        })
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn signup_url(&self) -> &Url {
        &self.signup_url
    }

    #[must_use]
    pub fn auth_token(&self) -> &SecretString {
        &self.auth_token
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}

impl std::fmt::Debug for SignupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupConfig")
            .field("signup_url", &self.signup_url.as_str())
            .field("auth_token", &"***")
            .field("debounce", &self.debounce)
            .finish()
    }
}
