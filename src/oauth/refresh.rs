use crate::error::YtreportyError;

use super::token::{RefreshedToken, Secret, Token};

/// Exchange the long-lived refresh token for a new access token.
///
/// Sends a form-encoded POST to the OAuth2 token endpoint. The returned
/// response is merged into the stored token by the caller; it is not a full
/// replacement because the endpoint may omit `refresh_token`.
pub async fn refresh_access_token(
    http: &reqwest::Client,
    token_url: &str,
    token: &Token,
    secret: &Secret,
) -> Result<RefreshedToken, YtreportyError> {
    let refresh_token = token.refresh_token.as_deref().ok_or_else(|| YtreportyError::Auth {
        status: 0,
        body: "stored token has no refresh_token".into(),
    })?;

    tracing::info!("Refreshing access token");
    let resp = http
        .post(token_url)
        .form(&[
            ("refresh_token", refresh_token),
            ("client_id", secret.client_id.as_str()),
            ("client_secret", secret.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .map_err(YtreportyError::Transport)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(YtreportyError::Auth {
            status: status.as_u16(),
            body,
        });
    }

    let refreshed: RefreshedToken = resp
        .json()
        .await
        .map_err(|e| YtreportyError::Protocol(format!("Token endpoint returned undecodable body: {e}")))?;
    if let Some(secs) = refreshed.expires_in {
        tracing::info!("New access token expires in {secs} seconds");
    }
    Ok(refreshed)
}
