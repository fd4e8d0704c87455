//! Function-as-a-service adapter.
//!
//! Events arrive in the API-gateway shape Netlify and AWS Lambda use. The
//! request is replayed through the ordinary router, so a function answers
//! exactly as the standalone server would.

use std::collections::HashMap;

use anyhow::Context;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    Router,
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub raw_query: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Maps `/.netlify/functions/server/api/data` to `/api/data`. Paths outside
/// the prefix pass through untouched.
pub fn strip_function_prefix(path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(prefix) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

fn build_request(event: ServerlessEvent, function_prefix: &str) -> anyhow::Result<Request<Body>> {
    let path = strip_function_prefix(&event.path, function_prefix);
    let uri = match event.raw_query.as_deref().filter(|q| !q.is_empty()) {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    let method = Method::from_bytes(event.http_method.as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", event.http_method))?;

    let body = match event.body {
        None => Body::empty(),
        Some(encoded) if event.is_base64_encoded => {
            Body::from(BASE64_STANDARD.decode(encoded).context("Body is not valid base64")?)
        }
        Some(text) => Body::from(text),
    };

    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in &event.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => tracing::warn!(header = %name, "Dropping invalid header from event"),
        }
    }
    Ok(builder.body(body)?)
}

/// Answers one event with the given router.
pub async fn invoke(router: Router, event: ServerlessEvent, function_prefix: &str) -> anyhow::Result<ServerlessResponse> {
    let request = build_request(event, function_prefix)?;
    tracing::debug!(method = %request.method(), uri = %request.uri(), "Serverless invocation");

    let response = router.oneshot(request).await?;
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await?;

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
        .collect();

    let (body, is_base64_encoded) = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => (text, false),
        Err(_) => (BASE64_STANDARD.encode(&bytes), true),
    };

    Ok(ServerlessResponse {
        status_code: parts.status.as_u16(),
        headers,
        body,
        is_base64_encoded,
    })
}
