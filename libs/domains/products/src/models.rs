use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product entity as exposed through the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the database
    pub id: i32,
    /// Product name (unique across the catalog)
    pub name: String,
    /// Product description
    pub description: String,
    /// Price in the store currency
    pub price: f64,
    /// Whether the product is currently in stock
    pub in_stock: bool,
    /// Free-form category label
    pub category: String,
}

/// DTO for creating or replacing a product
///
/// Used by both POST (create) and PUT (full replacement): every field is
/// required and the stored row is overwritten wholesale on update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub in_stock: bool,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Case-insensitive substring match on category
    pub category: Option<String>,
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    /// Minimum price (inclusive)
    pub min_price: Option<f64>,
    /// Maximum price (inclusive)
    pub max_price: Option<f64>,
    /// Column to sort by: one of `name`, `price`, `in_stock`, `category`.
    /// Unknown values fall back to the default ordering by id.
    pub sortby: Option<String>,
    /// Number of results to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            name: None,
            min_price: None,
            max_price: None,
            sortby: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> u64 {
    10
}

/// Response body for successful deletions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

impl Product {
    /// Replace all mutable fields from an input payload
    pub fn apply_input(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.in_stock = input.in_stock;
        self.category = input.category;
    }
}
