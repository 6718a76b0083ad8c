use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use session_store::SessionStore;
use tokio::sync::RwLock;

/// Storage key holding the session token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Session token cache, read-through and write-through to a `SessionStore`.
///
/// At most one token is held. Concurrent writers are not coordinated; the
/// last write wins.
pub struct SessionTokens {
    store: Arc<SessionStore>,
    cached: RwLock<Option<String>>,
}

impl SessionTokens {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            cached: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn get_token(&self) -> Option<String> {
        if let Some(token) = self.cached.read().await.clone() {
            return Some(token);
        }

        let stored = self.store.get_item(AUTH_TOKEN_KEY).await;
        if stored.is_some() {
            *self.cached.write().await = stored.clone();
        }
        stored
    }

    pub async fn set_token(&self, token: &str) {
        *self.cached.write().await = Some(token.to_string());
        self.store.set_item(AUTH_TOKEN_KEY, token).await;
    }

    pub async fn clear_token(&self) {
        *self.cached.write().await = None;
        self.store.remove_item(AUTH_TOKEN_KEY).await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get_token().await.is_some()
    }

    /// Establish a session from a successful response body.
    ///
    /// An already held token is returned untouched. Otherwise an explicit
    /// `token` field is adopted, or one is synthesized from the `user` id when
    /// the backend authenticates with a cookie and only returns the user.
    pub async fn bridge(&self, body: &Value) -> Option<String> {
        if let Some(existing) = self.get_token().await {
            return Some(existing);
        }

        if let Some(token) = body.get("token").and_then(Value::as_str) {
            if !token.is_empty() {
                info!("Adopting session token issued by backend");
                self.set_token(token).await;
                return Some(token.to_string());
            }
        }

        let user = body.get("user").filter(|user| user.is_object())?;
        let Some(user_id) = user_id(user) else {
            warn!("Response user has no id, no session token created");
            return None;
        };

        let token = synthesize_token(&user_id);
        info!("Created session token for user {}", user_id);
        self.set_token(&token).await;
        Some(token)
    }
}

/// `session_<userId>_<unix millis>`
pub fn synthesize_token(user_id: &str) -> String {
    format!("session_{}_{}", user_id, Utc::now().timestamp_millis())
}

fn user_id(user: &Value) -> Option<String> {
    ["id", "_id"]
        .iter()
        .filter_map(|key| user.get(*key))
        .find_map(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
