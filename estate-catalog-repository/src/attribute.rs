use crate::property::PropertyRepository;
use estate_catalog_error::{storage::StorageError, StorageResult};
use estate_catalog_models::{
    domain::prelude::{AttributeInfo, AttributePayload},
    entities::prelude::{
        Attribute, AttributeColumn, AttributeModel, AttributeOption, AttributeOptionActiveModel,
        AttributeOptionColumn, AttributeOptionModel, TypeAttributeLink, TypeAttributeLinkColumn,
    },
};
use sea_orm::{
    prelude::Expr, sea_query::Func, ActiveModelTrait, ActiveValue::Set, ColumnTrait,
    ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

pub struct AttributeRepository;

impl AttributeRepository {
    /// Inserts the attribute and its enum options in one transaction.
    pub async fn create<C>(payload: &AttributePayload, db: &C) -> StorageResult<AttributeInfo>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let attribute = payload.active_model().insert(&txn).await?;
        Self::insert_options(attribute.id, &payload.trimmed_options(), &txn).await?;
        txn.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Self::find_info(attribute.id, db).await
    }

    /// Full replacement of the attribute row and its option set.
    pub async fn update<C>(
        id: i32,
        payload: &AttributePayload,
        db: &C,
    ) -> StorageResult<AttributeInfo>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if !Self::exists_by_id(id, db).await? {
            return Err(StorageError::EntityNotFound(format!("attribute {id}")));
        }

        let txn = db.begin().await?;
        let mut attribute = payload.active_model();
        attribute.id = Set(id);
        attribute.update(&txn).await?;
        AttributeOption::delete_many()
            .filter(AttributeOptionColumn::AttributeId.eq(id))
            .exec(&txn)
            .await?;
        Self::insert_options(id, &payload.trimmed_options(), &txn).await?;
        txn.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Self::find_info(id, db).await
    }

    /// Deletes an attribute, refusing while anything still depends on it.
    ///
    /// Two usages block deletion: membership in any type's scope, and
    /// property records that still store a value under this attribute.
    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if !Self::exists_by_id(id, db).await? {
            return Err(StorageError::EntityNotFound(format!("attribute {id}")));
        }

        let (link_count, value_count) = Self::usage_counts(id, db).await?;
        if link_count > 0 {
            return Err(StorageError::Conflict(format!(
                "attribute {id} is assigned to {link_count} property type(s) and cannot be deleted"
            )));
        }
        if value_count > 0 {
            return Err(StorageError::Conflict(format!(
                "attribute {id} has stored values on {value_count} property(ies) and cannot be deleted"
            )));
        }

        let txn = db.begin().await?;
        AttributeOption::delete_many()
            .filter(AttributeOptionColumn::AttributeId.eq(id))
            .exec(&txn)
            .await?;
        Attribute::delete_by_id(id).exec(&txn).await?;
        txn.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(())
    }

    pub async fn find_all<C>(db: &C) -> StorageResult<Vec<AttributeInfo>>
    where
        C: ConnectionTrait,
    {
        let rows: Vec<(AttributeModel, Vec<AttributeOptionModel>)> = Attribute::find()
            .find_with_related(AttributeOption)
            .order_by_asc(AttributeColumn::Id)
            .order_by_asc(AttributeOptionColumn::SortOrder)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(attribute, options)| AttributeInfo::from_models(attribute, options))
            .collect())
    }

    pub async fn find_info<C>(id: i32, db: &C) -> StorageResult<AttributeInfo>
    where
        C: ConnectionTrait,
    {
        let attribute = Attribute::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(format!("attribute {id}")))?;
        let options = AttributeOption::find()
            .filter(AttributeOptionColumn::AttributeId.eq(id))
            .order_by_asc(AttributeOptionColumn::SortOrder)
            .all(db)
            .await?;
        Ok(AttributeInfo::from_models(attribute, options))
    }

    /// Loads the given attributes with their options, returned in the order
    /// of `ids`. Ids without a matching row are silently skipped; callers
    /// that need a guarantee check existence first.
    pub async fn find_infos_ordered<C>(ids: &[i32], db: &C) -> StorageResult<Vec<AttributeInfo>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let attributes = Attribute::find()
            .filter(AttributeColumn::Id.is_in(ids.to_vec()))
            .all(db)
            .await?;
        let mut options_by_attribute: HashMap<i32, Vec<AttributeOptionModel>> = HashMap::new();
        for option in AttributeOption::find()
            .filter(AttributeOptionColumn::AttributeId.is_in(ids.to_vec()))
            .order_by_asc(AttributeOptionColumn::SortOrder)
            .all(db)
            .await?
        {
            options_by_attribute
                .entry(option.attribute_id)
                .or_default()
                .push(option);
        }
        let mut by_id: HashMap<i32, AttributeModel> =
            attributes.into_iter().map(|a| (a.id, a)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|attribute| {
                let options = options_by_attribute.remove(&attribute.id).unwrap_or_default();
                AttributeInfo::from_models(attribute, options)
            })
            .collect())
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<AttributeModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Attribute::find_by_id(id).one(db).await?)
    }

    pub async fn exists_by_id<C>(id: i32, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Attribute::find_by_id(id).count(db).await? > 0)
    }

    /// Case-insensitive name collision check, optionally ignoring one row
    /// so updates do not collide with themselves.
    pub async fn exists_by_name<C>(
        name: &str,
        exclude_id: Option<i32>,
        db: &C,
    ) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = Attribute::find().filter(
            Expr::expr(Func::lower(Expr::col(AttributeColumn::Name)))
                .eq(name.trim().to_lowercase()),
        );
        if let Some(id) = exclude_id {
            query = query.filter(AttributeColumn::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// How many scope links and stored property values reference the
    /// attribute. Drives the deletion guard and the retype warning.
    pub async fn usage_counts<C>(id: i32, db: &C) -> StorageResult<(u64, u64)>
    where
        C: ConnectionTrait,
    {
        let link_count = TypeAttributeLink::find()
            .filter(TypeAttributeLinkColumn::AttributeId.eq(id))
            .count(db)
            .await?;
        let value_count = PropertyRepository::count_storing_value(id, db).await?;
        Ok((link_count, value_count))
    }

    async fn insert_options<C>(attribute_id: i32, options: &[String], db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        if options.is_empty() {
            return Ok(());
        }
        let models = options
            .iter()
            .enumerate()
            .map(|(i, value)| AttributeOptionActiveModel {
                attribute_id: Set(attribute_id),
                option_value: Set(value.clone()),
                sort_order: Set(i as i32),
                ..Default::default()
            });
        AttributeOption::insert_many(models).exec(db).await?;
        Ok(())
    }
}
