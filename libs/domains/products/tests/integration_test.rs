//! Integration tests for the Products domain against real PostgreSQL
//!
//! These tests exercise the PgProductRepository through the service layer
//! using a throwaway PostgreSQL container. They are ignored by default;
//! run them with `cargo test -- --ignored` when a Docker daemon is
//! available.

use domain_products::*;
use test_utils::TestDatabase;

fn product_input(name: &str, price: f64, in_stock: bool, category: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        in_stock,
        category: category.to_string(),
    }
}

async fn service_with_db() -> (ProductService<PgProductRepository>, TestDatabase) {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    (ProductService::new(repo), db)
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_create_and_get_product() {
    let (service, _db) = service_with_db().await;

    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    assert!(created.id >= 1);
    assert_eq!(created.name, "Widget");

    let fetched = service.get_product(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_duplicate_name_hits_unique_constraint() {
    let (service, _db) = service_with_db().await;

    service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let result = service
        .create_product(product_input("Widget", 5.0, false, "other"))
        .await;

    assert!(matches!(result, Err(ProductError::DuplicateName(_))));

    // The failed create must not have persisted a second row
    let filter = ProductFilter {
        name: Some("Widget".to_string()),
        ..Default::default()
    };
    let widgets = service.list_products(filter).await.unwrap();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].price, 9.99);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_list_with_category_filter_and_sort() {
    let (service, _db) = service_with_db().await;

    service
        .create_product(product_input("Drill", 89.0, true, "power tools"))
        .await
        .unwrap();
    service
        .create_product(product_input("Hammer", 12.0, true, "hand tools"))
        .await
        .unwrap();
    service
        .create_product(product_input("Apple", 0.5, true, "groceries"))
        .await
        .unwrap();

    let filter = ProductFilter {
        category: Some("TOOLS".to_string()),
        sortby: Some("price".to_string()),
        ..Default::default()
    };
    let products = service.list_products(filter).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Hammer");
    assert_eq!(products[1].name, "Drill");
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_list_pagination_is_stable() {
    let (service, _db) = service_with_db().await;

    for i in 0..5 {
        service
            .create_product(product_input(&format!("P{}", i), 1.0, true, "misc"))
            .await
            .unwrap();
    }

    let page = |skip| ProductFilter {
        skip,
        limit: 2,
        ..Default::default()
    };

    let first = service.list_products(page(0)).await.unwrap();
    let second = service.list_products(page(2)).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_update_is_full_replacement() {
    let (service, _db) = service_with_db().await;

    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let updated = service
        .update_product(
            created.id,
            product_input("Widget Pro", 14.99, false, "premium tools"),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Widget Pro");
    assert_eq!(updated.price, 14.99);
    assert!(!updated.in_stock);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_update_missing_row_returns_not_found() {
    let (service, _db) = service_with_db().await;

    let result = service
        .update_product(999_999, product_input("Ghost", 1.0, true, "none"))
        .await;

    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn test_delete_then_get_returns_not_found() {
    let (service, _db) = service_with_db().await;

    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    service.delete_product(created.id).await.unwrap();

    let result = service.get_product(created.id).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));

    let result = service.delete_product(created.id).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}
