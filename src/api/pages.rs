use std::collections::HashSet;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::context::Environment;
use crate::error::YtreportyError;

use super::Client;

const PAGE_TOKEN_FIELD: &str = "nextPageToken";
const PAGE_TOKEN_HEADER: &str = "pageToken";

/// What an API call ultimately yields: a decoded JSON document, or raw text
/// for responses that are not JSON at all (downloaded report contents).
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl Client {
    /// Issue a request and transparently follow pagination.
    ///
    /// A non-JSON body short-circuits to [`ApiResponse::Text`]; a JSON body
    /// without `nextPageToken` is returned unchanged. Otherwise subsequent
    /// pages are fetched by passing the continuation token back as a
    /// `pageToken` header, and the pages are merged into a single document.
    /// A continuation token seen twice stops the loop, so a misbehaving
    /// server cannot keep us fetching forever.
    pub async fn fetch_all(
        &self,
        method: Method,
        path: &str,
        env: &mut Environment,
        query: &[(String, String)],
        headers: Option<&HeaderMap>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, YtreportyError> {
        let first = self
            .send(method.clone(), path, env, query, headers, body)
            .await?;

        let doc: Value = match serde_json::from_str(&first.text) {
            Ok(doc) => doc,
            Err(_) => return Ok(ApiResponse::Text(first.text)),
        };
        if doc.get(PAGE_TOKEN_FIELD).is_none() {
            return Ok(ApiResponse::Json(doc));
        }
        let Value::Object(page) = doc else {
            return Ok(ApiResponse::Json(doc));
        };

        let mut pages = vec![page];
        let mut seen: HashSet<String> = HashSet::new();
        loop {
            let Some(token) = pages.last().and_then(continuation_token) else {
                break;
            };
            if !seen.insert(token.clone()) {
                // Same token twice: the server is looping.
                break;
            }
            tracing::info!("Fetching next page using token {token}");
            let mut page_headers = headers.cloned().unwrap_or_default();
            let value = HeaderValue::from_str(&token).map_err(|e| {
                YtreportyError::Protocol(format!("Continuation token is not a valid header value: {e}"))
            })?;
            page_headers.insert(PAGE_TOKEN_HEADER, value);
            let resp = self
                .send(method.clone(), path, env, query, Some(&page_headers), body)
                .await?;
            let next: Map<String, Value> = serde_json::from_str(&resp.text).map_err(|_| {
                YtreportyError::Protocol("Response content not JSON decodable".into())
            })?;
            pages.push(next);
        }

        Ok(ApiResponse::Json(Value::Object(merge_pages(&pages))))
    }
}

fn continuation_token(page: &Map<String, Value>) -> Option<String> {
    page.get(PAGE_TOKEN_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Merge page bodies into one document: every field except the continuation
/// token becomes an array concatenating, in page-arrival order, the elements
/// of that field from each page carrying it. A non-array field value counts
/// as a single element.
fn merge_pages(pages: &[Map<String, Value>]) -> Map<String, Value> {
    let mut merged = Map::new();
    for page in pages {
        for (key, value) in page {
            if key == PAGE_TOKEN_FIELD {
                continue;
            }
            let slot = merged
                .entry(key.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = slot {
                match value {
                    Value::Array(elems) => items.extend(elems.iter().cloned()),
                    other => items.push(other.clone()),
                }
            }
        }
    }
    merged
}
