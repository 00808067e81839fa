use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::context::Environment;
use crate::error::YtreportyError;
use crate::oauth::{refresh, store};

use super::Client;

/// Status line and body of one HTTP exchange, captured before any decoding.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub text: String,
}

impl Client {
    /// Issue one authenticated API request.
    ///
    /// The bearer token from `env` is attached to the caller's headers. If
    /// the API answers with an `UNAUTHENTICATED` error body, the access
    /// token is refreshed, merged into `env.token`, persisted, and the full
    /// original request (method, query, body) is reissued exactly once. Any
    /// other non-success status, including a failure after that one retry,
    /// surfaces as [`YtreportyError::Http`].
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        env: &mut Environment,
        query: &[(String, String)],
        headers: Option<&HeaderMap>,
        body: Option<&Value>,
    ) -> Result<RawResponse, YtreportyError> {
        let url = self.resolve(path)?;
        let mut resp = self
            .issue(method.clone(), url.clone(), env, query, headers, body)
            .await?;

        if !resp.status.is_success() && is_unauthenticated(&resp.text) {
            tracing::info!("Request was not authenticated");
            let refreshed = refresh::refresh_access_token(
                &self.http,
                self.token_url.as_str(),
                &env.token,
                &env.secret,
            )
            .await?;
            env.token.merge(refreshed);
            store::save_token(&env.paths, &env.token)?;
            resp = self.issue(method, url, env, query, headers, body).await?;
        }

        tracing::info!("Received status code {}", resp.status.as_u16());
        if !resp.status.is_success() {
            return Err(YtreportyError::Http {
                status: resp.status.as_u16(),
                body: resp.text,
            });
        }
        Ok(resp)
    }

    async fn issue(
        &self,
        method: Method,
        url: Url,
        env: &Environment,
        query: &[(String, String)],
        headers: Option<&HeaderMap>,
        body: Option<&Value>,
    ) -> Result<RawResponse, YtreportyError> {
        let mut req = self
            .http
            .request(method, url)
            .headers(env.token.bearer_headers(headers)?);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(json) = body {
            req = req.json(json);
        }
        let resp = req.send().await.map_err(YtreportyError::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(YtreportyError::Transport)?;
        Ok(RawResponse { status, text })
    }
}

/// The API signals an expired access token with a structured error body
/// whose `error.status` field is `"UNAUTHENTICATED"`. Anything else (other
/// error codes, unstructured bodies) must not trigger a refresh.
fn is_unauthenticated(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|doc| {
            doc.get("error")
                .and_then(|e| e.get("status"))
                .map(|s| s == "UNAUTHENTICATED")
        })
        .unwrap_or(false)
}
