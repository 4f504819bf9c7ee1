//! `SeaORM` Entity for property listings.
//!
//! Only the slice of the listing record this service owns: the dynamic
//! `attributes` value map, keyed by attribute id (decimal string) and
//! validated against the type's scope at write time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub type_id: i32,
    pub attributes: Json,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property_type::Entity",
        from = "Column::TypeId",
        to = "super::property_type::Column::Id"
    )]
    PropertyType,
}

impl Related<super::property_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
