use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::error::YtreportyError;

/// The persisted OAuth2 session state.
///
/// Fields the API may add that we do not model are kept in `extra` so they
/// survive a load/refresh/save cycle.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Token {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decoded response from the OAuth2 token endpoint.
///
/// Google does not always re-issue `refresh_token`, so this is merged into
/// the existing [`Token`] rather than replacing it.
#[derive(Debug, Deserialize, Clone)]
pub struct RefreshedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    /// Merge a refresh response into this token, keeping the existing
    /// `refresh_token` when the response omits it.
    pub fn merge(&mut self, refreshed: RefreshedToken) {
        self.access_token = refreshed.access_token;
        if refreshed.refresh_token.is_some() {
            self.refresh_token = refreshed.refresh_token;
        }
        if refreshed.expires_in.is_some() {
            self.expires_in = refreshed.expires_in;
        }
        for (key, value) in refreshed.extra {
            self.extra.insert(key, value);
        }
    }

    /// Build request headers carrying the bearer token.
    ///
    /// Caller-supplied headers are copied first and win on conflict for
    /// every key except `Authorization`, which is always set from the token.
    pub fn bearer_headers(&self, extra: Option<&HeaderMap>) -> Result<HeaderMap, YtreportyError> {
        let mut headers = extra.cloned().unwrap_or_default();
        let value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|e| YtreportyError::Protocol(format!("Access token is not a valid header value: {e}")))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Application credential from the client-secret file. Read-only.
#[derive(Debug, Deserialize, Clone)]
pub struct Secret {
    pub client_id: String,
    pub client_secret: String,
}
