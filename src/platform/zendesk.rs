//! Zendesk REST implementation of the platform client.

use async_trait::async_trait;
use serde_json::Value;

use super::{PlatformClient, PlatformError};
use crate::config::PlatformConfig;

pub struct ZendeskClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    token: String,
}

impl ZendeskClient {
    /// Build a client from config, reading the API token from the
    /// configured environment variable.
    pub fn new(config: &PlatformConfig) -> Result<Self, PlatformError> {
        if config.subdomain.is_empty() {
            return Err(PlatformError::Credentials(
                "platform.subdomain is not configured".to_string(),
            ));
        }
        if config.email.is_empty() {
            return Err(PlatformError::Credentials(
                "platform.email is not configured".to_string(),
            ));
        }
        let token = std::env::var(&config.api_token_env).map_err(|_| {
            PlatformError::Credentials(format!("{} is not set", config.api_token_env))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: format!("https://{}.zendesk.com", config.subdomain),
            email: config.email.clone(),
            token,
        })
    }

    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl PlatformClient for ZendeskClient {
    async fn request(&self, path: &str) -> Result<Value, PlatformError> {
        let url = self.absolute_url(path);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            // Zendesk API token auth: "email/token" as the username
            .basic_auth(format!("{}/token", self.email), Some(&self.token))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            log::warn!("platform request failed: {status} {url}");
            return Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
