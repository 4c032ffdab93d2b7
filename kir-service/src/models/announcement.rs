use serde::{Deserialize, Serialize};
use validator::Validate;

/// Community announcement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Announcement {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Defaults to "Admin" when omitted; an explicit `null` stays null.
    #[serde(default = "default_author")]
    pub author: Option<String>,
}

fn default_author() -> Option<String> {
    Some("Admin".to_string())
}
