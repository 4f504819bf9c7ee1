use estate_catalog_models::{
    domain::prelude::{AttributePayload, TypePayload},
    enums::attribute::AttributeDataType,
    settings::Sqlite,
};
use estate_catalog_repository::{AttributeRepository, PropertyTypeRepository};
use sea_orm::DatabaseConnection;

pub async fn setup() -> DatabaseConnection {
    estate_catalog_storage::connect_and_migrate(&Sqlite::in_memory())
        .await
        .expect("in-memory database should initialize")
}

pub fn attribute_payload(
    name: &str,
    data_type: AttributeDataType,
    options: &[&str],
) -> AttributePayload {
    AttributePayload {
        name: name.to_string(),
        data_type,
        is_filterable: true,
        unit: None,
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

pub async fn create_attribute(
    db: &DatabaseConnection,
    name: &str,
    data_type: AttributeDataType,
    options: &[&str],
) -> i32 {
    AttributeRepository::create(&attribute_payload(name, data_type, options), db)
        .await
        .expect("attribute should insert")
        .id
}

pub async fn create_type(db: &DatabaseConnection, name: &str) -> i32 {
    let payload = TypePayload {
        name: name.to_string(),
        description: None,
    };
    PropertyTypeRepository::create(&payload, db)
        .await
        .expect("property type should insert")
        .id
}
