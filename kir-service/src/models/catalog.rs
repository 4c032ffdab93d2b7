//! Schemas kept for the collections managed outside this service's HTTP
//! surface. Only their validation rules live here.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    /// Age in years.
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in dollars.
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

fn default_true() -> bool {
    true
}
