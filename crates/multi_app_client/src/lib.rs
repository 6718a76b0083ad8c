pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod paths;
pub mod todos;
pub mod utils;

use std::sync::Arc;

use session_store::{FileStore, SessionStore};

pub use api::client::{ApiClient, NO_BODY};
pub use api::endpoints::CandidateEndpoints;
pub use api::response::{normalize_data, ApiResponse};
pub use auth::service::AuthService;
pub use auth::tokens::{SessionTokens, AUTH_TOKEN_KEY};
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, Result};
pub use todos::service::TodoService;

/// Auth and todo services wired to one shared session
pub struct MultiAppClient {
    pub auth: AuthService,
    pub todos: TodoService,
    pub tokens: Arc<SessionTokens>,
}

impl MultiAppClient {
    /// Build both services on top of the file store named by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let platform = Arc::new(FileStore::new(config.storage_file()));
        let store = Arc::new(SessionStore::new(platform));
        Self::with_store(config, store)
    }

    pub fn with_store(config: &ClientConfig, store: Arc<SessionStore>) -> Result<Self> {
        let tokens = Arc::new(SessionTokens::new(store));
        let auth = AuthService::new(config, Arc::clone(&tokens))?;
        let todos = TodoService::new(config, Arc::clone(&tokens))?;
        Ok(Self {
            auth,
            todos,
            tokens,
        })
    }
}
