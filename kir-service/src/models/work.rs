use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_http_url;

/// A youth scientific work submitted by a student or team.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Work {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Link to the full work (Google Drive and the like).
    #[serde(default)]
    #[validate(custom(function = "validate_http_url"))]
    pub file_url: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_http_url"))]
    pub thumbnail_url: Option<String>,
}
