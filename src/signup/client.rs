//! HTTP client for the signup service.
//!
//! Sends one `POST` per call and hands back the parts of the reply the
//! classifier needs. The body is only read when it can matter, which is a
//! `422` with a JSON content type.

use super::config::SignupConfig;
use super::response::is_json_content_type;
use crate::APP_USER_AGENT;
use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Status, content type and (when relevant) body of a signup reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl SignupReply {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_json(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some("application/json".to_string());
        self.body = body.into();
        self
    }
}

#[derive(Clone, Debug)]
pub struct SignupClient {
    http: Client,
    config: SignupConfig,
}

impl SignupClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: SignupConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("Error creating reqwest client")?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    /// Post `username` and `password` to the signup endpoint.
    ///
    /// Any HTTP status is a successful call; only transport failures (and a
    /// failed body read on a `422`) are errors.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the body cannot be read.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<SignupReply> {
        let url = self.config.signup_url().clone();

        let span = info_span!(
            "signup.create_user",
            http.method = "POST",
            url = %url
        );

        async {
            let response = self
                .http
                .post(url.clone())
                .bearer_auth(self.config.auth_token().expose_secret())
                .json(&SignupRequest { username, password })
                .send()
                .await
                .with_context(|| format!("Error sending signup request to {url}"))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            debug!(status = status.as_u16(), ?content_type, "signup response");

            let body = if status == StatusCode::UNPROCESSABLE_ENTITY
                && content_type.as_deref().is_some_and(is_json_content_type)
            {
                response
                    .bytes()
                    .await
                    .context("Error reading signup response body")?
                    .to_vec()
            } else {
                Vec::new()
            };

            Ok(SignupReply {
                status,
                content_type,
                body,
            })
        }
        .instrument(span)
        .await
    }
}
