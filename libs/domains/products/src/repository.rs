use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// List products with optional filters
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Replace an existing product
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Mirrors the PostgreSQL implementation's semantics: case-insensitive
/// substring filters, ascending sort with id as tiebreaker, and a unique
/// constraint on name.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i32, Product>>>,
    next_id: AtomicI32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(category) = &filter.category {
        if !product
            .category
            .to_lowercase()
            .contains(&category.to_lowercase())
        {
            return false;
        }
    }
    if let Some(name) = &filter.name {
        if !product.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if let Some(min_price) = filter.min_price {
        if product.price < min_price {
            return false;
        }
    }
    if let Some(max_price) = filter.max_price {
        if product.price > max_price {
            return false;
        }
    }
    true
}

fn compare_by(a: &Product, b: &Product, sortby: Option<&str>) -> Ordering {
    let primary = match sortby {
        Some("name") => a.name.cmp(&b.name),
        Some("price") => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        Some("in_stock") => a.in_stock.cmp(&b.in_stock),
        Some("category") => a.category.cmp(&b.category),
        _ => Ordering::Equal,
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        // Unique name, matching the database constraint
        if products.values().any(|p| p.name == input.name) {
            return Err(ProductError::DuplicateName(input.name));
        }

        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            in_stock: input.in_stock,
            category: input.category,
        };
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| matches_filter(p, &filter))
            .cloned()
            .collect();

        result.sort_by(|a, b| compare_by(a, b, filter.sortby.as_deref()));

        let result: Vec<Product> = result
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&id) {
            return Err(ProductError::NotFound(id));
        }

        let name_taken = products
            .values()
            .any(|p| p.id != id && p.name == input.name);
        if name_taken {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_input(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
