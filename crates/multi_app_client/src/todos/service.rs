use std::sync::Arc;

use reqwest::Method;

use crate::api::client::{ApiClient, NO_BODY};
use crate::api::response::ApiResponse;
use crate::auth::tokens::SessionTokens;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::todos::models::{NewTodo, TodoFilters, TodoUpdate};

/// Todo resource operations. Every call requires a session token.
pub struct TodoService {
    client: ApiClient,
}

impl TodoService {
    pub fn new(config: &ClientConfig, tokens: Arc<SessionTokens>) -> Result<Self> {
        let client = ApiClient::new(config.todos_candidates(), config.timeout(), tokens)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> Result<ApiResponse> {
        self.client
            .request_authenticated("/", Method::POST, Some(todo), &[])
            .await
    }

    pub async fn get_todos(&self, filters: &TodoFilters) -> Result<ApiResponse> {
        self.client
            .request_authenticated("/", Method::GET, NO_BODY, &filters.to_query())
            .await
    }

    pub async fn get_todo_stats(&self, year: Option<i32>, month: Option<u32>) -> Result<ApiResponse> {
        let filters = TodoFilters {
            year,
            month,
            ..Default::default()
        };
        self.client
            .request_authenticated("/stats", Method::GET, NO_BODY, &filters.to_query())
            .await
    }

    pub async fn get_todo_by_id(&self, id: &str) -> Result<ApiResponse> {
        self.client
            .request_authenticated(&format!("/{id}"), Method::GET, NO_BODY, &[])
            .await
    }

    pub async fn update_todo(&self, id: &str, update: &TodoUpdate) -> Result<ApiResponse> {
        self.client
            .request_authenticated(&format!("/{id}"), Method::PUT, Some(update), &[])
            .await
    }

    pub async fn delete_todo(&self, id: &str) -> Result<ApiResponse> {
        self.client
            .request_authenticated(&format!("/{id}"), Method::DELETE, NO_BODY, &[])
            .await
    }

    pub async fn toggle_todo_status(&self, id: &str) -> Result<ApiResponse> {
        self.client
            .request_authenticated(&format!("/{id}/toggle"), Method::PATCH, NO_BODY, &[])
            .await
    }
}
