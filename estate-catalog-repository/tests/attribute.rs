mod common;

use common::{attribute_payload, create_attribute, create_type, setup};
use estate_catalog_error::storage::StorageError;
use estate_catalog_models::{
    domain::prelude::NewProperty, enums::attribute::AttributeDataType,
};
use estate_catalog_repository::{
    AttributeRepository, PropertyRepository, PropertyTypeRepository, ScopeRepository,
};
use serde_json::json;

#[tokio::test]
async fn create_stores_enum_options_in_order() {
    let db = setup().await;
    let id = create_attribute(
        &db,
        "Color",
        AttributeDataType::Enum,
        &["red", "blue", "green"],
    )
    .await;

    let info = AttributeRepository::find_info(id, &db).await.unwrap();
    assert_eq!(info.option_values(), vec!["red", "blue", "green"]);
    assert_eq!(info.data_type, AttributeDataType::Enum);
}

#[tokio::test]
async fn update_replaces_the_option_set() {
    let db = setup().await;
    let id = create_attribute(&db, "Color", AttributeDataType::Enum, &["red", "blue"]).await;

    let payload = attribute_payload("Color", AttributeDataType::Enum, &["black", "white", "red"]);
    let info = AttributeRepository::update(id, &payload, &db).await.unwrap();
    assert_eq!(info.option_values(), vec!["black", "white", "red"]);
}

#[tokio::test]
async fn update_of_missing_attribute_is_not_found() {
    let db = setup().await;
    let payload = attribute_payload("Ghost", AttributeDataType::String, &[]);
    let err = AttributeRepository::update(777, &payload, &db).await.unwrap_err();
    assert!(matches!(err, StorageError::EntityNotFound(_)));
}

#[tokio::test]
async fn delete_is_blocked_while_linked_to_a_type() {
    let db = setup().await;
    let type_id = create_type(&db, "Villa").await;
    let pool = create_attribute(&db, "Pool", AttributeDataType::Boolean, &[]).await;
    ScopeRepository::replace(type_id, &[pool], &db).await.unwrap();

    let err = AttributeRepository::delete(pool, &db).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    // Unlinking frees it for deletion.
    ScopeRepository::replace(type_id, &[], &db).await.unwrap();
    AttributeRepository::delete(pool, &db).await.unwrap();
    assert!(!AttributeRepository::exists_by_id(pool, &db).await.unwrap());
}

#[tokio::test]
async fn delete_is_blocked_while_a_property_stores_a_value() {
    let db = setup().await;
    let type_id = create_type(&db, "Villa").await;
    let surface = create_attribute(&db, "Surface", AttributeDataType::Decimal, &[]).await;
    ScopeRepository::replace(type_id, &[surface], &db).await.unwrap();

    let mut attributes = serde_json::Map::new();
    attributes.insert(surface.to_string(), json!(240.5));
    PropertyRepository::create(
        &NewProperty {
            type_id,
            attributes,
        },
        &db,
    )
    .await
    .unwrap();

    // Even after the scope link goes away, the stored value still blocks.
    ScopeRepository::replace(type_id, &[], &db).await.unwrap();
    let err = AttributeRepository::delete(surface, &db).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn delete_of_missing_attribute_is_not_found() {
    let db = setup().await;
    let err = AttributeRepository::delete(31337, &db).await.unwrap_err();
    assert!(matches!(err, StorageError::EntityNotFound(_)));
}

#[tokio::test]
async fn deleting_options_goes_with_the_attribute() {
    let db = setup().await;
    let id = create_attribute(&db, "Heating", AttributeDataType::Enum, &["gas", "electric"]).await;
    AttributeRepository::delete(id, &db).await.unwrap();
    assert!(AttributeRepository::find_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn name_lookup_is_case_insensitive() {
    let db = setup().await;
    let id = create_attribute(&db, "Surface", AttributeDataType::Decimal, &[]).await;

    assert!(AttributeRepository::exists_by_name("surface", None, &db)
        .await
        .unwrap());
    assert!(AttributeRepository::exists_by_name(" SURFACE ", None, &db)
        .await
        .unwrap());
    // An update may keep its own name.
    assert!(!AttributeRepository::exists_by_name("surface", Some(id), &db)
        .await
        .unwrap());
}

#[tokio::test]
async fn type_delete_cascades_links_but_not_attributes() {
    let db = setup().await;
    let type_id = create_type(&db, "Bungalow").await;
    let garden = create_attribute(&db, "Garden", AttributeDataType::Boolean, &[]).await;
    ScopeRepository::replace(type_id, &[garden], &db).await.unwrap();

    PropertyTypeRepository::delete(type_id, &db).await.unwrap();
    assert!(AttributeRepository::exists_by_id(garden, &db).await.unwrap());
    let (links, _) = AttributeRepository::usage_counts(garden, &db).await.unwrap();
    assert_eq!(links, 0);
}

#[tokio::test]
async fn type_delete_is_blocked_by_existing_properties() {
    let db = setup().await;
    let type_id = create_type(&db, "Villa").await;
    PropertyRepository::create(
        &NewProperty {
            type_id,
            attributes: serde_json::Map::new(),
        },
        &db,
    )
    .await
    .unwrap();

    let err = PropertyTypeRepository::delete(type_id, &db).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
}
