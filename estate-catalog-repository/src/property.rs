use crate::scope::ScopeRepository;
use estate_catalog_error::{storage::StorageError, StorageResult};
use estate_catalog_models::{
    domain::prelude::{validate_property_values, NewProperty, PropertyInfo},
    entities::prelude::{Property, PropertyType},
};
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct PropertyRepository;

impl PropertyRepository {
    /// Inserts a property after checking its dynamic values against the
    /// scope of the target type.
    pub async fn create<C>(payload: &NewProperty, db: &C) -> StorageResult<PropertyInfo>
    where
        C: ConnectionTrait,
    {
        if PropertyType::find_by_id(payload.type_id).count(db).await? == 0 {
            return Err(StorageError::EntityNotFound(format!(
                "property type {}",
                payload.type_id
            )));
        }
        let scope = ScopeRepository::find_scope(payload.type_id, db).await?;
        validate_property_values(&scope, &payload.attributes)
            .map_err(|e| StorageError::Validation(e.to_string()))?;

        let model = payload.active_model().insert(db).await?;
        Ok(model.into())
    }

    pub async fn find_all<C>(db: &C) -> StorageResult<Vec<PropertyInfo>>
    where
        C: ConnectionTrait,
    {
        Ok(Property::find()
            .all(db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn find_info<C>(id: i32, db: &C) -> StorageResult<PropertyInfo>
    where
        C: ConnectionTrait,
    {
        Property::find_by_id(id)
            .one(db)
            .await?
            .map(Into::into)
            .ok_or_else(|| StorageError::EntityNotFound(format!("property {id}")))
    }

    /// How many properties still carry a value under the given attribute id.
    /// SQLite `json_extract` probes the `attributes` map directly.
    pub async fn count_storing_value<C>(attribute_id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Property::find()
            .filter(Expr::cust_with_values(
                r#"json_extract("attributes", ?) IS NOT NULL"#,
                [format!("$.\"{attribute_id}\"")],
            ))
            .count(db)
            .await?)
    }
}
