use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use crate::api::endpoints::CandidateEndpoints;
use crate::api::response::ApiResponse;
use crate::auth::tokens::SessionTokens;
use crate::error::{ApiError, Result};
use crate::utils::http_utils::execute_json_request;

/// Typed "no request body" for calls without a payload
pub const NO_BODY: Option<&()> = None;

/// JSON client for one logical service, with sequential failover across its
/// candidate base URLs
pub struct ApiClient {
    client: Client,
    endpoints: CandidateEndpoints,
    tokens: Arc<SessionTokens>,
}

impl ApiClient {
    pub fn new<I, S>(candidates: I, timeout: Duration, tokens: Arc<SessionTokens>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::build_http_client(timeout)?;
        Ok(Self::with_http_client(
            client,
            CandidateEndpoints::new(candidates)?,
            tokens,
        ))
    }

    pub fn with_http_client(
        client: Client,
        endpoints: CandidateEndpoints,
        tokens: Arc<SessionTokens>,
    ) -> Self {
        Self {
            client,
            endpoints,
            tokens,
        }
    }

    fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))
    }

    pub fn endpoints(&self) -> &CandidateEndpoints {
        &self.endpoints
    }

    pub fn tokens(&self) -> &Arc<SessionTokens> {
        &self.tokens
    }

    /// Send `method endpoint` and normalize the reply.
    ///
    /// With `requires_auth` the held session token, if any, is sent as a
    /// bearer credential; a missing token is left for the backend to reject.
    pub async fn request<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&T>,
        requires_auth: bool,
    ) -> Result<ApiResponse> {
        self.request_with_query(endpoint, method, body, &[], requires_auth)
            .await
    }

    pub async fn request_with_query<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&T>,
        query: &[(String, String)],
        requires_auth: bool,
    ) -> Result<ApiResponse> {
        let token = if requires_auth {
            self.tokens.get_token().await
        } else {
            None
        };
        self.send(endpoint, method, body, query, token).await
    }

    /// Like `request_with_query`, for resources that never accept anonymous
    /// calls: without a token this fails with `ApiError::AuthRequired` before
    /// any I/O.
    pub async fn request_authenticated<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&T>,
        query: &[(String, String)],
    ) -> Result<ApiResponse> {
        let Some(token) = self.tokens.get_token().await else {
            warn!("No session token for {} {}", method, endpoint);
            return Err(ApiError::AuthRequired);
        };
        self.send(endpoint, method, body, query, Some(token)).await
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&T>,
        query: &[(String, String)],
        token: Option<String>,
    ) -> Result<ApiResponse> {
        let response_body = self
            .send_with_failover(endpoint, method, body, query, token.as_deref())
            .await?;

        let session_token = self.tokens.bridge(&response_body).await;
        Ok(ApiResponse::from_body(&response_body, session_token))
    }

    /// Walk the candidates from the first one. Only network-class failures
    /// advance to the next candidate; the last candidate's error is final.
    async fn send_with_failover<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&T>,
        query: &[(String, String)],
        token: Option<&str>,
    ) -> Result<Value> {
        let total = self.endpoints.len();
        let mut attempt = 0;

        loop {
            let base_url = self.endpoints.select(attempt);
            let url = format!("{}{}", base_url, endpoint);
            info!(
                "API request (attempt {}/{}): {} {}",
                attempt + 1,
                total,
                method,
                url
            );

            match execute_json_request(&self.client, method.clone(), &url, token, body, query).await
            {
                Ok(value) => return Ok(value),
                Err(e) if e.is_network() && attempt < self.endpoints.last_index() => {
                    attempt += 1;
                    warn!(
                        "API error (attempt {}/{}): {}. Switching to URL: {}",
                        attempt,
                        total,
                        e,
                        self.endpoints.urls()[attempt]
                    );
                }
                Err(e) => {
                    if e.is_network() {
                        error!("All API URLs failed for {} {}", method, endpoint);
                    }
                    return Err(e);
                }
            }
        }
    }
}
