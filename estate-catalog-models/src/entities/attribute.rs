//! `SeaORM` Entity for globally reusable catalog attributes.

use crate::enums::attribute::AttributeDataType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name, unique case-insensitively across the global set.
    pub name: String,
    pub data_type: AttributeDataType,
    /// Consumed by the listing search UI; no structural rule.
    pub is_filterable: bool,
    /// Optional display unit (e.g. "m²").
    pub unit: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attribute_option::Entity")]
    AttributeOption,
    #[sea_orm(has_many = "super::type_attribute_link::Entity")]
    TypeAttributeLink,
}

impl Related<super::attribute_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeOption.def()
    }
}

impl Related<super::type_attribute_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeAttributeLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
