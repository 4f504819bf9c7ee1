use crate::scope::ScopeRepository;
use estate_catalog_error::{storage::StorageError, StorageResult};
use estate_catalog_models::{
    domain::prelude::{PropertyTypeInfo, PropertyTypeWithAttributes, TypePayload},
    entities::prelude::{
        Property, PropertyColumn, PropertyType, PropertyTypeColumn, PropertyTypeModel,
        TypeAttributeLink, TypeAttributeLinkColumn,
    },
};
use sea_orm::{
    prelude::Expr, sea_query::Func, ActiveModelTrait, ActiveValue::Set, ColumnTrait,
    ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct PropertyTypeRepository;

impl PropertyTypeRepository {
    pub async fn create<C>(payload: &TypePayload, db: &C) -> StorageResult<PropertyTypeInfo>
    where
        C: ConnectionTrait,
    {
        let model = payload.active_model().insert(db).await?;
        Ok(model.into())
    }

    pub async fn update<C>(
        id: i32,
        payload: &TypePayload,
        db: &C,
    ) -> StorageResult<PropertyTypeInfo>
    where
        C: ConnectionTrait,
    {
        if !Self::exists_by_id(id, db).await? {
            return Err(StorageError::EntityNotFound(format!("property type {id}")));
        }
        let mut model = payload.active_model();
        model.id = Set(id);
        Ok(model.update(db).await?.into())
    }

    /// Deletes a type and its scope links together. Refused while property
    /// records of this type exist.
    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if !Self::exists_by_id(id, db).await? {
            return Err(StorageError::EntityNotFound(format!("property type {id}")));
        }

        let property_count = Property::find()
            .filter(PropertyColumn::TypeId.eq(id))
            .count(db)
            .await?;
        if property_count > 0 {
            return Err(StorageError::Conflict(format!(
                "property type {id} is used by {property_count} property(ies) and cannot be deleted"
            )));
        }

        let txn = db.begin().await?;
        TypeAttributeLink::delete_many()
            .filter(TypeAttributeLinkColumn::TypeId.eq(id))
            .exec(&txn)
            .await?;
        PropertyType::delete_by_id(id).exec(&txn).await?;
        txn.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(())
    }

    pub async fn find_all_with_attributes<C>(db: &C) -> StorageResult<Vec<PropertyTypeWithAttributes>>
    where
        C: ConnectionTrait,
    {
        let types = PropertyType::find()
            .order_by_asc(PropertyTypeColumn::Id)
            .all(db)
            .await?;
        let mut result = Vec::with_capacity(types.len());
        for model in types {
            let attributes = ScopeRepository::find_scope(model.id, db).await?;
            result.push(PropertyTypeWithAttributes::new(model, attributes));
        }
        Ok(result)
    }

    pub async fn find_with_attributes<C>(
        id: i32,
        db: &C,
    ) -> StorageResult<PropertyTypeWithAttributes>
    where
        C: ConnectionTrait,
    {
        let model = PropertyType::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(format!("property type {id}")))?;
        let attributes = ScopeRepository::find_scope(id, db).await?;
        Ok(PropertyTypeWithAttributes::new(model, attributes))
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<PropertyTypeModel>>
    where
        C: ConnectionTrait,
    {
        Ok(PropertyType::find_by_id(id).one(db).await?)
    }

    pub async fn exists_by_id<C>(id: i32, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(PropertyType::find_by_id(id).count(db).await? > 0)
    }

    pub async fn exists_by_name<C>(
        name: &str,
        exclude_id: Option<i32>,
        db: &C,
    ) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = PropertyType::find().filter(
            Expr::expr(Func::lower(Expr::col(PropertyTypeColumn::Name)))
                .eq(name.trim().to_lowercase()),
        );
        if let Some(id) = exclude_id {
            query = query.filter(PropertyTypeColumn::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }
}
