use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::context::Environment;
use crate::error::YtreportyError;
use crate::timefmt::zulu;

use super::{ApiResponse, Client};

/// Optional creation/start-time filters for [`list`].
#[derive(Debug, Default, Clone)]
pub struct ReportFilters {
    pub created_after: Option<DateTime<Utc>>,
    pub start_time_at_or_after: Option<DateTime<Utc>>,
    pub start_time_before: Option<DateTime<Utc>>,
}

impl ReportFilters {
    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(ts) = &self.created_after {
            query.push(("createdAfter".into(), zulu(ts)));
        }
        if let Some(ts) = &self.start_time_at_or_after {
            query.push(("startTimeAtOrAfter".into(), zulu(ts)));
        }
        if let Some(ts) = &self.start_time_before {
            query.push(("startTimeBefore".into(), zulu(ts)));
        }
        query
    }
}

/// List reports produced by a reporting job.
pub async fn list(
    client: &Client,
    env: &mut Environment,
    job_id: &str,
    filters: &ReportFilters,
) -> Result<ApiResponse, YtreportyError> {
    let path = format!("/v1/jobs/{job_id}/reports");
    client
        .fetch_all(Method::GET, &path, env, &filters.query(), None, None)
        .await
}

/// Retrieve metadata about one report.
pub async fn get(
    client: &Client,
    env: &mut Environment,
    job_id: &str,
    report_id: &str,
) -> Result<ApiResponse, YtreportyError> {
    let path = format!("/v1/jobs/{job_id}/reports/{report_id}");
    client.fetch_all(Method::GET, &path, env, &[], None, None).await
}

/// List the report types that can be retrieved.
pub async fn list_types(
    client: &Client,
    env: &mut Environment,
) -> Result<ApiResponse, YtreportyError> {
    client
        .fetch_all(Method::GET, "/v1/reportTypes", env, &[], None, None)
        .await
}

/// Download a report's contents.
///
/// Two authenticated steps: fetch the report metadata for its `downloadUrl`,
/// then GET that absolute URL. Report contents are typically CSV, so the
/// result is usually [`ApiResponse::Text`].
pub async fn fetch(
    client: &Client,
    env: &mut Environment,
    job_id: &str,
    report_id: &str,
) -> Result<ApiResponse, YtreportyError> {
    let metadata = get(client, env, job_id, report_id).await?;
    let ApiResponse::Json(doc) = metadata else {
        return Err(YtreportyError::Protocol(
            "Report metadata response is not JSON".into(),
        ));
    };
    let download_url = doc
        .get("downloadUrl")
        .and_then(|u| u.as_str())
        .ok_or_else(|| YtreportyError::Protocol("Report metadata has no downloadUrl".into()))?
        .to_owned();
    client
        .fetch_all(Method::GET, &download_url, env, &[], None, None)
        .await
}
