//! Record schemas.
//!
//! Each schema is stored in the collection named by [`CollectionSchema::COLLECTION`]
//! (the lowercase schema name). Serde carries the required/optional markers and
//! defaults; `validator` carries the value constraints.

pub mod announcement;
pub mod catalog;
pub mod work;

pub use announcement::Announcement;
pub use catalog::{Product, User};
pub use work::Work;

use serde::{de::DeserializeOwned, Serialize};
use validator::{Validate, ValidationError, ValidateUrl};

pub trait CollectionSchema: Serialize + DeserializeOwned + Validate {
    const COLLECTION: &'static str;
}

impl CollectionSchema for Announcement {
    const COLLECTION: &'static str = "announcement";
}

impl CollectionSchema for Work {
    const COLLECTION: &'static str = "work";
}

impl CollectionSchema for User {
    const COLLECTION: &'static str = "user";
}

impl CollectionSchema for Product {
    const COLLECTION: &'static str = "product";
}

/// Accepts absolute `http`/`https` URLs only.
pub(crate) fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let lower = value.to_ascii_lowercase();
    let has_scheme = lower.starts_with("http://") || lower.starts_with("https://");

    if has_scheme && value.validate_url() {
        Ok(())
    } else {
        let mut err = ValidationError::new("http_url");
        err.message = Some("URL scheme should be 'http' or 'https'".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_accepts_web_links() {
        assert!(validate_http_url("https://drive.google.com/file/d/abc").is_ok());
        assert!(validate_http_url("http://example.com").is_ok());
    }

    #[test]
    fn http_url_rejects_other_schemes_and_garbage() {
        assert!(validate_http_url("ftp://example.com/file.pdf").is_err());
        assert!(validate_http_url("not a url").is_err());
        assert!(validate_http_url("").is_err());
    }

    #[test]
    fn collection_names_are_lowercase_schema_names() {
        assert_eq!(Announcement::COLLECTION, "announcement");
        assert_eq!(Work::COLLECTION, "work");
        assert_eq!(User::COLLECTION, "user");
        assert_eq!(Product::COLLECTION, "product");
    }
}
