use crate::entities::prelude::{PropertyActiveModel, PropertyModel};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub id: i32,
    pub type_id: i32,
    pub attributes: JsonValue,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PropertyModel> for PropertyInfo {
    fn from(model: PropertyModel) -> Self {
        Self {
            id: model.id,
            type_id: model.type_id,
            attributes: model.attributes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Create body for a property listing. `attributes` maps attribute id
/// (decimal string) to a raw JSON value; every entry is validated against
/// the type's scope before the insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProperty {
    #[validate(range(min = 1, message = "type_id is required"))]
    pub type_id: i32,
    #[serde(default)]
    pub attributes: Map<String, JsonValue>,
}

impl NewProperty {
    pub fn active_model(&self) -> PropertyActiveModel {
        PropertyActiveModel {
            type_id: Set(self.type_id),
            attributes: Set(JsonValue::Object(self.attributes.clone())),
            ..Default::default()
        }
    }
}
