//! `SeaORM` Entity for the ordered type↔attribute association.
//!
//! Composite primary key `(type_id, attribute_id)`; `sort_order` is unique
//! per type and encodes the display position in the consumer mobile app.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "type_attribute_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub type_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub attribute_id: i32,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property_type::Entity",
        from = "Column::TypeId",
        to = "super::property_type::Column::Id"
    )]
    PropertyType,
    #[sea_orm(
        belongs_to = "super::attribute::Entity",
        from = "Column::AttributeId",
        to = "super::attribute::Column::Id"
    )]
    Attribute,
}

impl Related<super::property_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyType.def()
    }
}

impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attribute.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
