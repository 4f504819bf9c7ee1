use super::{attribute::AttributeInfo, common::schema_error};
use crate::entities::prelude::{PropertyTypeActiveModel, PropertyTypeModel};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PropertyTypeModel> for PropertyTypeInfo {
    fn from(model: PropertyTypeModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A type with its scope: linked attributes sorted by `sort_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTypeWithAttributes {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<AttributeInfo>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyTypeWithAttributes {
    pub fn new(model: PropertyTypeModel, attributes: Vec<AttributeInfo>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            attributes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Create/update body for a property type; updates are full replacements.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_type_payload", skip_on_field_errors = false))]
pub struct TypePayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TypePayload {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    pub fn active_model(&self) -> PropertyTypeActiveModel {
        PropertyTypeActiveModel {
            name: Set(self.trimmed_name().to_string()),
            description: Set(self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)),
            ..Default::default()
        }
    }
}

fn validate_type_payload(payload: &TypePayload) -> Result<(), ValidationError> {
    if payload.trimmed_name().is_empty() {
        return Err(schema_error("name", "name is required"));
    }
    Ok(())
}

/// Body of the scope-replacement call: the complete ordered attribute id
/// list for one type. Position in the list becomes `sort_order`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_scope_payload", skip_on_field_errors = false))]
pub struct ScopePayload {
    pub attribute_ids: Vec<i32>,
}

fn validate_scope_payload(payload: &ScopePayload) -> Result<(), ValidationError> {
    for (i, id) in payload.attribute_ids.iter().enumerate() {
        if payload.attribute_ids[..i].contains(id) {
            return Err(schema_error(
                "attribute_ids",
                &format!("duplicate attribute id: {id}"),
            ));
        }
    }
    Ok(())
}
