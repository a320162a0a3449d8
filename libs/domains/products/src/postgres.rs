use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, SqlErr, Statement,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, ProductFilter, ProductInput},
    query::build_list_query,
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
///
/// The connection pool is injected at construction time; nothing here owns
/// global state.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Log the full database error and return an opaque internal error.
///
/// Callers never see driver details; those only go to the logs.
fn internal(context: &str, e: DbErr) -> ProductError {
    tracing::error!(error = %e, "{}", context);
    ProductError::Internal("An unexpected database error occurred".to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ProductError::DuplicateName(name)
            } else {
                internal("Failed to insert product", e)
            }
        })?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| internal("Failed to fetch product", e))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let (sql, params) = build_list_query(&filter);
        let stmt = Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, params);

        let models = entity::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await
            .map_err(|e| internal("Failed to list products", e))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Product> {
        let name = input.name.clone();
        let active_model = entity::replacement_model(id, input);

        let model = active_model.update(&self.db).await.map_err(|e| {
            if matches!(e, DbErr::RecordNotUpdated) {
                ProductError::NotFound(id)
            } else if is_unique_violation(&e) {
                ProductError::DuplicateName(name)
            } else {
                internal("Failed to update product", e)
            }
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| internal("Failed to delete product", e))?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
