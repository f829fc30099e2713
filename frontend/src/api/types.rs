use chrono::NaiveDateTime;
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body shared by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIdentity {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestStartResponse {
    #[serde(default)]
    pub session_started: bool,
    #[serde(default)]
    pub figure_slug: Option<String>,
    #[serde(default)]
    pub max_questions: Option<u32>,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestAskRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestAskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Value>,
    #[serde(default)]
    pub remaining_questions: Option<u32>,
    #[serde(default)]
    pub max_questions: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestUpgradeResponse {
    #[serde(default)]
    pub upgraded: bool,
    #[serde(default)]
    pub thread_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub transferred_messages: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeResult {
    NotUpgraded,
    Upgraded {
        thread_id: i64,
        transferred_messages: Option<u32>,
    },
}

impl From<GuestUpgradeResponse> for UpgradeResult {
    fn from(response: GuestUpgradeResponse) -> Self {
        match (response.upgraded, response.thread_id) {
            (true, Some(thread_id)) => UpgradeResult::Upgraded {
                thread_id,
                transferred_messages: response.transferred_messages,
            },
            _ => UpgradeResult::NotUpgraded,
        }
    }
}

/// Question inside a registered user's thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskRequest {
    pub user_id: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Value>,
    #[serde(default)]
    pub thread_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FigureSummary {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub short_summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadSummary {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub figure_slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl ThreadSummary {
    pub fn display_title(&self) -> String {
        match (&self.title, &self.figure_slug) {
            (Some(title), _) if !title.trim().is_empty() => title.clone(),
            (_, Some(slug)) => format!("Conversation with {}", slug),
            _ => format!("Thread #{}", self.id),
        }
    }
}

/// Backend error body (`{"detail": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "TIMEOUT")
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "PARSE_ERROR")
    }

    /// Sign-in succeeded but `/auth/me` did not.
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "PROFILE_ERROR")
    }

    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self {
            error: detail.unwrap_or_else(|| format!("Error {}", status)),
            code: "HTTP_ERROR".to_string(),
            status: Some(status),
            details: None,
        }
    }

    pub fn is_network(&self) -> bool {
        self.code == "REQUEST_FAILED"
    }

    pub fn is_timeout(&self) -> bool {
        self.code == "TIMEOUT"
    }

    /// 403 and 429 both mean the guest allowance is spent.
    pub fn is_quota_rejection(&self) -> bool {
        matches!(self.status, Some(403) | Some(429))
    }
}
