mod common;

use common::{create_attribute, create_type, setup};
use estate_catalog_error::storage::StorageError;
use estate_catalog_models::{domain::prelude::NewProperty, enums::attribute::AttributeDataType};
use estate_catalog_repository::{PropertyRepository, ScopeRepository};
use serde_json::{json, Map};

async fn villa_with_scope(db: &sea_orm::DatabaseConnection) -> (i32, i32, i32, i32) {
    let type_id = create_type(db, "Villa").await;
    let pool = create_attribute(db, "Pool", AttributeDataType::Boolean, &[]).await;
    let surface = create_attribute(db, "Surface", AttributeDataType::Decimal, &[]).await;
    let color = create_attribute(db, "Color", AttributeDataType::Enum, &["red", "blue"]).await;
    ScopeRepository::replace(type_id, &[pool, surface, color], db)
        .await
        .unwrap();
    (type_id, pool, surface, color)
}

#[tokio::test]
async fn create_accepts_values_matching_the_scope() {
    let db = setup().await;
    let (type_id, pool, surface, color) = villa_with_scope(&db).await;

    let mut attributes = Map::new();
    attributes.insert(pool.to_string(), json!(true));
    attributes.insert(surface.to_string(), json!(120));
    attributes.insert(color.to_string(), json!("blue"));

    let info = PropertyRepository::create(&NewProperty { type_id, attributes }, &db)
        .await
        .unwrap();
    assert_eq!(info.type_id, type_id);
    assert_eq!(info.attributes[pool.to_string()], json!(true));
}

#[tokio::test]
async fn create_rejects_out_of_scope_attribute() {
    let db = setup().await;
    let (type_id, ..) = villa_with_scope(&db).await;
    let stray = create_attribute(&db, "Lift", AttributeDataType::Boolean, &[]).await;

    let mut attributes = Map::new();
    attributes.insert(stray.to_string(), json!(true));
    let err = PropertyRepository::create(&NewProperty { type_id, attributes }, &db)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn create_rejects_mistyped_and_unknown_option_values() {
    let db = setup().await;
    let (type_id, pool, _, color) = villa_with_scope(&db).await;

    let mut attributes = Map::new();
    attributes.insert(pool.to_string(), json!("yes"));
    let err = PropertyRepository::create(
        &NewProperty {
            type_id,
            attributes,
        },
        &db,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));

    let mut attributes = Map::new();
    attributes.insert(color.to_string(), json!("green"));
    let err = PropertyRepository::create(
        &NewProperty {
            type_id,
            attributes,
        },
        &db,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn create_against_missing_type_is_not_found() {
    let db = setup().await;
    let err = PropertyRepository::create(
        &NewProperty {
            type_id: 5555,
            attributes: Map::new(),
        },
        &db,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::EntityNotFound(_)));
}

#[tokio::test]
async fn count_storing_value_sees_only_real_usage() {
    let db = setup().await;
    let (type_id, pool, surface, _) = villa_with_scope(&db).await;

    let mut attributes = Map::new();
    attributes.insert(pool.to_string(), json!(false));
    PropertyRepository::create(&NewProperty { type_id, attributes }, &db)
        .await
        .unwrap();

    assert_eq!(
        PropertyRepository::count_storing_value(pool, &db).await.unwrap(),
        1
    );
    assert_eq!(
        PropertyRepository::count_storing_value(surface, &db)
            .await
            .unwrap(),
        0
    );
}
