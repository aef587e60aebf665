//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (手工艺品)
///
/// `price` is the current selling price in whole rupees;
/// `original_price` is the pre-discount price shown struck through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category_id: i64,
    pub artisan_name: String,
    /// Display glyph or image path
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category_id: i64,
    pub artisan_name: String,
    pub image: Option<String>,
    pub stock_quantity: Option<i32>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub category_id: Option<i64>,
    pub artisan_name: Option<String>,
    pub image: Option<String>,
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
}
