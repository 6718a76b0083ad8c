use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Object keys hoisted into `ApiResponse::data`, highest precedence first
const DATA_KEYS: [&str; 2] = ["data", "todos"];

/// Response shape every caller receives, whatever the backend returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

impl ApiResponse {
    /// Normalize a successful backend body
    pub fn from_body(body: &Value, token: Option<String>) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
            .to_string();
        let user = body.get("user").filter(|user| user.is_object()).cloned();

        Self {
            success: true,
            message,
            data: normalize_data(body),
            token,
            user,
            total_pages: body.get("totalPages").and_then(Value::as_u64),
            current_page: body.get("currentPage").and_then(Value::as_u64),
            total_items: body.get("totalItems").and_then(Value::as_u64),
        }
    }

    /// Use the `user` object as the payload when the body carried one
    pub fn with_user_as_data(self) -> Self {
        match self.user.clone() {
            Some(user) => Self {
                data: Some(user),
                ..self
            },
            None => self,
        }
    }

    /// Deserialize `data` into a typed value
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self.data.clone().unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| ApiError::UnexpectedData(e.to_string()))
    }
}

/// Pick the payload out of a lenient backend envelope.
///
/// A top-level array is returned verbatim. For an object, the first
/// non-null of `data`, `todos` is hoisted; otherwise the object itself is the
/// payload.
pub fn normalize_data(body: &Value) -> Option<Value> {
    match body {
        Value::Null => None,
        Value::Object(map) => DATA_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|value| !value.is_null())
            .cloned()
            .or_else(|| Some(body.clone())),
        other => Some(other.clone()),
    }
}
