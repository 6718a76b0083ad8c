//! Todo resource types as exchanged with the todo service

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    Shopping,
    Health,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Completion filter for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Completed,
    Active,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

macro_rules! lowercase_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "invalid {}: {other} (expected one of: {})",
                        stringify!($name).to_ascii_lowercase(),
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

lowercase_enum!(Category {
    Work => "work",
    Personal => "personal",
    Shopping => "shopping",
    Health => "health",
    Other => "other",
});
lowercase_enum!(Priority { Low => "low", Medium => "medium", High => "high" });
lowercase_enum!(StatusFilter { Completed => "completed", Active => "active", All => "all" });
lowercase_enum!(SortOrder { Asc => "asc", Desc => "desc" });

/// A todo as returned by the backend. Dates are kept as the backend's
/// ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owner id, or the populated user document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    pub date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub due_date: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub date: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub due_date: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    pub completed: bool,
}

impl NewTodo {
    /// An open todo dated now, with default category and priority
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            date: Utc::now().to_rfc3339(),
            title: title.into(),
            description: None,
            category: Category::default(),
            due_date: None,
            priority: Priority::default(),
            attachments: Vec::new(),
            completed: false,
        }
    }
}

/// Partial update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TodoUpdate::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: u64,
    pub completed: u64,
    pub active: u64,
    #[serde(default)]
    pub by_category: HashMap<String, u64>,
    #[serde(default)]
    pub by_priority: HashMap<String, u64>,
}

/// Listing filters, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<StatusFilter>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub date: Option<String>,
}

impl TodoFilters {
    /// Query pairs for the set filters only
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };

        push("page", self.page.map(|v| v.to_string()));
        push("limit", self.limit.map(|v| v.to_string()));
        push("status", self.status.map(|v| v.to_string()));
        push("category", self.category.map(|v| v.to_string()));
        push("priority", self.priority.map(|v| v.to_string()));
        push("year", self.year.map(|v| v.to_string()));
        push("month", self.month.map(|v| v.to_string()));
        push("search", self.search.clone());
        push("sortBy", self.sort_by.clone());
        push("sortOrder", self.sort_order.map(|v| v.to_string()));
        push("date", self.date.clone());
        query
    }
}
