//! Shared helpers for API client integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use multi_app_client::{ApiClient, AuthService, SessionTokens, TodoService};
use session_store::SessionStore;
use wiremock::{MockServer, Request, ResponseTemplate};

/// Per-attempt timeout used by tests; mocks that should "time out" delay
/// well past it
pub const TEST_TIMEOUT: Duration = Duration::from_millis(250);
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

/// Records which candidate served each attempt, in arrival order
#[derive(Debug, Clone, Default)]
pub struct AttemptLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl AttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &str) {
        self.entries.lock().unwrap().push(label.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Responder that logs `label` and answers with `template`
    pub fn responder(
        &self,
        label: &'static str,
        template: ResponseTemplate,
    ) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
        let log = self.clone();
        move |_req: &Request| {
            log.record(label);
            template.clone()
        }
    }
}

pub fn fresh_tokens() -> Arc<SessionTokens> {
    Arc::new(SessionTokens::new(Arc::new(SessionStore::in_memory())))
}

pub fn auth_base(server: &MockServer) -> String {
    format!("{}/api/auth", server.uri())
}

pub fn todos_base(server: &MockServer) -> String {
    format!("{}/api/todos", server.uri())
}

pub fn api_client(candidates: Vec<String>, tokens: Arc<SessionTokens>) -> ApiClient {
    ApiClient::new(candidates, TEST_TIMEOUT, tokens).expect("api client")
}

pub fn auth_service(candidates: Vec<String>, tokens: Arc<SessionTokens>) -> AuthService {
    AuthService::with_client(api_client(candidates, tokens))
}

pub fn todo_service(candidates: Vec<String>, tokens: Arc<SessionTokens>) -> TodoService {
    TodoService::with_client(api_client(candidates, tokens))
}

/// A base URL nothing listens on
pub fn refused_base() -> String {
    "http://127.0.0.1:1/api/auth".to_string()
}

/// Mock response bodies shaped like the backend's
pub struct MockResponseBuilder;

impl MockResponseBuilder {
    /// Cookie-style login: user object, no token field
    pub fn login_success(user_id: &str) -> serde_json::Value {
        serde_json::json!({
            "message": "Login successful",
            "user": {
                "id": user_id,
                "name": "Test User",
                "email": "test@example.com"
            }
        })
    }

    pub fn profile(user_id: &str) -> serde_json::Value {
        serde_json::json!({
            "user": {
                "id": user_id,
                "name": "Test User",
                "city": "Pune"
            }
        })
    }

    pub fn todo(id: &str, title: &str, completed: bool) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "user": "u1",
            "date": "2024-06-04T00:00:00.000Z",
            "title": title,
            "category": "work",
            "dueDate": null,
            "priority": "medium",
            "attachments": [],
            "completed": completed,
            "createdAt": "2024-06-04T10:00:00.000Z",
            "updatedAt": "2024-06-04T10:00:00.000Z"
        })
    }

    pub fn todo_page(todos: Vec<serde_json::Value>, current_page: u64, total_pages: u64) -> serde_json::Value {
        let total_items = todos.len();
        serde_json::json!({
            "todos": todos,
            "currentPage": current_page,
            "totalPages": total_pages,
            "totalItems": total_items
        })
    }

    pub fn stats() -> serde_json::Value {
        serde_json::json!({
            "data": {
                "total": 5,
                "completed": 2,
                "active": 3,
                "byCategory": {"work": 3, "personal": 2},
                "byPriority": {"high": 1, "medium": 4}
            }
        })
    }

    pub fn message(text: &str) -> serde_json::Value {
        serde_json::json!({ "message": text })
    }
}
