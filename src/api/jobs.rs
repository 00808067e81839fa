use reqwest::Method;
use serde_json::json;

use crate::context::Environment;
use crate::error::YtreportyError;

use super::{ApiResponse, Client};

/// Create a reporting job.
pub async fn create(
    client: &Client,
    env: &mut Environment,
    report_type_id: &str,
    name: &str,
) -> Result<ApiResponse, YtreportyError> {
    let body = json!({ "reportTypeId": report_type_id, "name": name });
    let resp = client
        .send(Method::POST, "/v1/jobs", env, &[], None, Some(&body))
        .await?;
    Ok(decode(resp.text))
}

/// Delete a reporting job.
pub async fn delete(
    client: &Client,
    env: &mut Environment,
    job_id: &str,
) -> Result<ApiResponse, YtreportyError> {
    let path = format!("/v1/jobs/{job_id}");
    let resp = client.send(Method::DELETE, &path, env, &[], None, None).await?;
    Ok(decode(resp.text))
}

/// Get a reporting job.
pub async fn get(
    client: &Client,
    env: &mut Environment,
    job_id: &str,
) -> Result<ApiResponse, YtreportyError> {
    let path = format!("/v1/jobs/{job_id}");
    client.fetch_all(Method::GET, &path, env, &[], None, None).await
}

/// List reporting jobs.
pub async fn list(client: &Client, env: &mut Environment) -> Result<ApiResponse, YtreportyError> {
    client.fetch_all(Method::GET, "/v1/jobs", env, &[], None, None).await
}

/// Create and delete never paginate, so their bodies are decoded directly.
fn decode(text: String) -> ApiResponse {
    match serde_json::from_str(&text) {
        Ok(doc) => ApiResponse::Json(doc),
        Err(_) => ApiResponse::Text(text),
    }
}
