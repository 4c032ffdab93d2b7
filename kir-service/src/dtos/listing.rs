use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_ANNOUNCEMENT_LIMIT: i64 = 20;
pub const DEFAULT_WORK_LIMIT: i64 = 50;

/// `limit` follows driver semantics: `0` means "no limit" and a negative
/// value counts as its absolute value.
#[derive(Debug, Deserialize, Validate)]
pub struct AnnouncementListParams {
    #[serde(default = "default_announcement_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkListParams {
    #[serde(default = "default_work_limit")]
    pub limit: i64,
    /// Case-insensitive substring matched against title or author.
    pub q: Option<String>,
}

fn default_announcement_limit() -> i64 {
    DEFAULT_ANNOUNCEMENT_LIMIT
}

fn default_work_limit() -> i64 {
    DEFAULT_WORK_LIMIT
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
