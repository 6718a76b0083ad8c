use log::{debug, error, info, warn};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;

use crate::error::{ApiError, Result, DEFAULT_ERROR_MESSAGE};

/// Executes one HTTP attempt and decodes the JSON body.
///
/// Transport failures (connect, timeout, interrupted body) map to
/// `ApiError::Network`. A non-2xx status maps to `ApiError::Backend` carrying
/// the body's `message`. A 2xx body that is not JSON maps to
/// `ApiError::Decode`.
pub async fn execute_json_request<T: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    auth_token: Option<&str>,
    json_body: Option<&T>,
    query: &[(String, String)],
) -> Result<Value> {
    let url_val =
        reqwest::Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
    let mut request_builder = client
        .request(method.clone(), url_val.clone())
        .header("Content-Type", "application/json");

    if let Some(token) = auth_token {
        request_builder = request_builder.header("Authorization", format!("Bearer {}", token));
    }

    if !query.is_empty() {
        request_builder = request_builder.query(query);
    }

    // GET requests never carry a body
    if let Some(body) = json_body {
        if method != Method::GET {
            request_builder = request_builder.json(body);
        }
    }

    info!("Sending {} request to {}", method.as_str(), url_val);
    let start_time = std::time::Instant::now();

    let response = match request_builder.send().await {
        Ok(resp) => resp,
        Err(e) => return Err(network_error(url, e)),
    };

    let status = response.status();
    info!(
        "Got response from {} after {:?} with status {}",
        url_val,
        start_time.elapsed(),
        status
    );

    let text = response.text().await.map_err(|e| network_error(url, e))?;
    let parsed = serde_json::from_str::<Value>(&text);
    debug!("Response body: {}", text);

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .ok()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        warn!("Request to {} rejected with {}: {}", url_val, status, message);
        return Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    parsed.map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn network_error(url: &str, e: reqwest::Error) -> ApiError {
    error!("Failed HTTP request to {}: {}", url, e);
    if let Some(source) = e.source() {
        error!("Error source: {:?}", source);
    }
    if e.is_timeout() {
        error!("Request timed out");
    }
    if e.is_connect() {
        error!("Connection error");
    }

    ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
        timed_out: e.is_timeout(),
    }
}

