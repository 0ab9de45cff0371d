//! Integration tests for the Products domain
//!
//! Run the stored-procedure repositories against a real PostgreSQL (via
//! testcontainers, migrated with the workspace `Migrator`):
//! - procedures map rows and report affected counts
//! - the foreign key holds when the cascade is bypassed
//! - numeric values round-trip exactly

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn product(builder: &TestDataBuilder, suffix: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: builder.name("product", suffix),
        description: Some("Integration test product".to_string()),
        price: builder.price(),
        delivery_price: Decimal::new(150, 2),
    }
}

fn option(product_id: Uuid, name: &str) -> ProductOption {
    ProductOption {
        id: Uuid::new_v4(),
        product_id,
        name: name.to_string(),
        description: None,
    }
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_save_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_and_get");

    let input = product(&builder, "main");
    repo.save(&input, EntityState::New).await.unwrap();

    let retrieved = assert_some(
        repo.get_by_id(input.id).await.unwrap(),
        "product should exist",
    );
    assert_uuid_eq(retrieved.id, input.id, "retrieved product id");
    assert_eq!(retrieved, input);
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_get_missing_product_is_none() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_decimal_values_round_trip() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("decimal_round_trip");

    let mut input = product(&builder, "precise");
    input.price = Decimal::new(123_456_789, 4);
    input.delivery_price = Decimal::new(1, 3);
    repo.save(&input, EntityState::New).await.unwrap();

    let retrieved = repo.get_by_id(input.id).await.unwrap().unwrap();
    assert_eq!(retrieved.price, input.price);
    assert_eq!(retrieved.delivery_price, input.delivery_price);
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_list_by_name_substring() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_by_name");

    let mut blue = product(&builder, "blue");
    blue.name = "Blue Widget".into();
    let mut gadget = product(&builder, "gadget");
    gadget.name = "Gadget".into();
    let mut lower = product(&builder, "lower");
    lower.name = "small widget".into();

    for p in [&blue, &gadget, &lower] {
        repo.save(p, EntityState::New).await.unwrap();
    }

    let matched = repo.list("Widget").await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, blue.id);

    assert_eq!(repo.list("").await.unwrap().len(), 3);
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_update_overwrites_and_reports() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let mut p = product(&builder, "main");
    repo.save(&p, EntityState::New).await.unwrap();

    p.description = None;
    p.price = Decimal::new(4200, 2);
    repo.save(&p, EntityState::Loaded).await.unwrap();

    assert_eq!(repo.get_by_id(p.id).await.unwrap(), Some(p));
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_saving_loaded_product_unchanged_keeps_row() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_loaded_unchanged");

    let mut input = product(&builder, "stable");
    input.price = Decimal::new(1_000_000_000_000_000_001, 18);
    repo.save(&input, EntityState::New).await.unwrap();

    let loaded = assert_some(repo.get_by_id(input.id).await.unwrap(), "product should exist");
    repo.save(&loaded, EntityState::Loaded).await.unwrap();

    let reloaded = assert_some(repo.get_by_id(input.id).await.unwrap(), "product should still exist");
    assert_eq!(reloaded, loaded);
    assert_eq!(reloaded, input);
    assert_eq!(reloaded.price.to_string(), "1.000000000000000001");
    assert_eq!(repo.list("").await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_delete_cascades_options() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let options = PgProductOptionRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("cascade");

    let p = product(&builder, "parent");
    products.save(&p, EntityState::New).await.unwrap();
    for name in ["Red", "Green", "Blue"] {
        options
            .save(&option(p.id, name), EntityState::New)
            .await
            .unwrap();
    }
    assert_eq!(options.list_by_product(p.id).await.unwrap().len(), 3);

    assert_eq!(products.delete(p.id).await.unwrap(), 1);
    assert!(products.get_by_id(p.id).await.unwrap().is_none());
    assert!(options.list_by_product(p.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_option_requires_existing_product() {
    let db = TestDatabase::new().await;
    let options = PgProductOptionRepository::new(db.connection());

    let err = options
        .save(&option(Uuid::new_v4(), "Orphan"), EntityState::New)
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Database(_)));
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_delete_missing_option_affects_nothing() {
    let db = TestDatabase::new().await;
    let options = PgProductOptionRepository::new(db.connection());

    assert_eq!(options.delete(Uuid::new_v4()).await.unwrap(), 0);
}

#[tokio::test]
#[ignore] // Requires Docker for the Postgres container
async fn test_service_over_postgres() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(
        PgProductRepository::new(db.connection()),
        PgProductOptionRepository::new(db.connection()),
    );
    let builder = TestDataBuilder::from_test_name("service");

    let created = service
        .create_product(product(&builder, "svc"))
        .await
        .unwrap();
    let opt = service
        .create_option(created.id, option(Uuid::nil(), "Red"))
        .await
        .unwrap();
    assert_uuid_eq(opt.product_id, created.id, "option product id");

    let fetched = service.get_option(opt.id).await.unwrap();
    assert_eq!(fetched, opt);

    let removed = service.delete_product(created.id).await.unwrap();
    assert_eq!(removed, created);
    assert!(matches!(
        service.get_product(created.id).await,
        Err(ProductError::NotFound(_))
    ));
}
