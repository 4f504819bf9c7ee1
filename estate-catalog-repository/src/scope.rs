use crate::attribute::AttributeRepository;
use estate_catalog_error::{storage::StorageError, StorageResult};
use estate_catalog_models::{
    domain::prelude::AttributeInfo,
    entities::prelude::{
        Attribute, AttributeColumn, PropertyType, TypeAttributeLink, TypeAttributeLinkActiveModel,
        TypeAttributeLinkColumn,
    },
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;

pub struct ScopeRepository;

impl ScopeRepository {
    /// Replaces a type's attribute scope with the given ordered id list.
    ///
    /// The whole list is rewritten in one transaction: existing links are
    /// dropped and one link per id is inserted with `sort_order` equal to
    /// the id's position. An empty list clears the scope. On any failure
    /// the transaction rolls back and the previous scope stays intact.
    pub async fn replace<C>(
        type_id: i32,
        attribute_ids: &[i32],
        db: &C,
    ) -> StorageResult<Vec<AttributeInfo>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        if PropertyType::find_by_id(type_id).count(&txn).await? == 0 {
            return Err(StorageError::EntityNotFound(format!(
                "property type {type_id}"
            )));
        }
        let missing = Self::missing_attribute_ids(attribute_ids, &txn).await?;
        if !missing.is_empty() {
            return Err(StorageError::Validation(format!(
                "unknown attribute id(s): {missing:?}"
            )));
        }

        TypeAttributeLink::delete_many()
            .filter(TypeAttributeLinkColumn::TypeId.eq(type_id))
            .exec(&txn)
            .await?;
        if !attribute_ids.is_empty() {
            let links = attribute_ids
                .iter()
                .enumerate()
                .map(|(position, attribute_id)| TypeAttributeLinkActiveModel {
                    type_id: Set(type_id),
                    attribute_id: Set(*attribute_id),
                    sort_order: Set(position as i32),
                });
            TypeAttributeLink::insert_many(links).exec(&txn).await?;
        }

        txn.commit()
            .await
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!(
            type_id,
            scope_len = attribute_ids.len(),
            "replaced attribute scope"
        );

        Self::find_scope(type_id, db).await
    }

    /// The type's linked attributes ordered by `sort_order`, then by
    /// attribute id as a stable tiebreak.
    pub async fn find_scope<C>(type_id: i32, db: &C) -> StorageResult<Vec<AttributeInfo>>
    where
        C: ConnectionTrait,
    {
        let links = TypeAttributeLink::find()
            .filter(TypeAttributeLinkColumn::TypeId.eq(type_id))
            .order_by_asc(TypeAttributeLinkColumn::SortOrder)
            .order_by_asc(TypeAttributeLinkColumn::AttributeId)
            .all(db)
            .await?;
        let ids: Vec<i32> = links.iter().map(|link| link.attribute_id).collect();
        AttributeRepository::find_infos_ordered(&ids, db).await
    }

    async fn missing_attribute_ids<C>(ids: &[i32], db: &C) -> StorageResult<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let existing: Vec<i32> = Attribute::find()
            .select_only()
            .column(AttributeColumn::Id)
            .filter(AttributeColumn::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(db)
            .await?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }
}
