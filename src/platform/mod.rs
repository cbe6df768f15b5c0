//! Ticketing-platform client boundary.
//!
//! The panel talks to its host platform through the narrow
//! [`PlatformClient`] trait: an opaque request API returning JSON. The
//! shipped implementation is [`ZendeskClient`]; tests substitute a
//! canned client.

pub mod zendesk;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use zendesk::ZendeskClient;

use crate::i18n;

/// Errors surfaced by platform requests.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("platform rejected request ({status}): {body}")]
    Api { status: u16, body: Value },
    #[error("platform returned an unexpected payload: {0}")]
    InvalidResponse(String),
    #[error("missing credentials: {0}")]
    Credentials(String),
}

impl PlatformError {
    /// Human-readable, localized message for the status line, derived
    /// from the platform's error payload: a known `error` code maps to
    /// a catalog entry, otherwise the payload's own `description` is
    /// shown, otherwise a generic message.
    pub fn localized_message(&self) -> String {
        if let PlatformError::Api { body, .. } = self {
            if let Some(code) = body.get("error").and_then(Value::as_str) {
                let key = format!("global.error.{}", code.to_lowercase());
                let text = i18n::t(&key);
                if text != key {
                    return text;
                }
            }
            if let Some(description) = body.get("description").and_then(Value::as_str) {
                return description.to_string();
            }
        }
        i18n::t("global.error.message")
    }
}

/// Opaque RPC-like API of the host platform.
///
/// `path` is either a path relative to the account base URL or an
/// absolute URL (the platform hands out absolute `next_page` links).
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn request(&self, path: &str) -> Result<Value, PlatformError>;
}
