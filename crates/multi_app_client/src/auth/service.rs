use std::sync::Arc;

use log::info;
use reqwest::Method;
use serde_json::json;

use crate::api::client::{ApiClient, NO_BODY};
use crate::api::response::ApiResponse;
use crate::auth::models::{LoginData, OtpData, RegisterData, SendOtpData};
use crate::auth::tokens::SessionTokens;
use crate::config::ClientConfig;
use crate::error::Result;

/// Account operations against the auth service.
///
/// Responses carrying a `user` object expose it as `data`.
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(config: &ClientConfig, tokens: Arc<SessionTokens>) -> Result<Self> {
        let client = ApiClient::new(config.auth_candidates(), config.timeout(), tokens)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Create an account. The reply carries the new user but no token.
    pub async fn register(&self, data: &RegisterData) -> Result<ApiResponse> {
        let response = self
            .client
            .request("/register", Method::POST, Some(data), false)
            .await?;
        Ok(ApiResponse {
            token: None,
            ..response.with_user_as_data()
        })
    }

    pub async fn send_otp(&self, data: &SendOtpData) -> Result<ApiResponse> {
        self.client
            .request("/send-otp", Method::POST, Some(data), false)
            .await
            .map(ApiResponse::with_user_as_data)
    }

    pub async fn verify_otp(&self, data: &OtpData) -> Result<ApiResponse> {
        self.client
            .request("/verify-otp", Method::POST, Some(data), false)
            .await
            .map(ApiResponse::with_user_as_data)
    }

    pub async fn login_with_password(&self, data: &LoginData) -> Result<ApiResponse> {
        self.client
            .request("/login", Method::POST, Some(data), false)
            .await
            .map(ApiResponse::with_user_as_data)
    }

    /// End the session on the backend, then drop the local token
    pub async fn logout(&self) -> Result<ApiResponse> {
        let response = self
            .client
            .request("/logout", Method::POST, Some(&json!({})), true)
            .await?
            .with_user_as_data();
        if response.success {
            self.clear_token().await;
            info!("Session token cleared after logout");
        }
        Ok(response)
    }

    /// Fetch the signed-in user. Fails with `ApiError::AuthRequired` when no
    /// session token is held.
    pub async fn get_profile(&self) -> Result<ApiResponse> {
        self.client
            .request_authenticated("/profile", Method::GET, NO_BODY, &[])
            .await
            .map(ApiResponse::with_user_as_data)
    }

    pub async fn set_token(&self, token: &str) {
        self.client.tokens().set_token(token).await;
    }

    pub async fn get_token(&self) -> Option<String> {
        self.client.tokens().get_token().await
    }

    pub async fn clear_token(&self) {
        self.client.tokens().clear_token().await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.tokens().is_authenticated().await
    }
}
