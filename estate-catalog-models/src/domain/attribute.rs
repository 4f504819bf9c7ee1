use super::common::schema_error;
use crate::{
    entities::prelude::{AttributeActiveModel, AttributeModel, AttributeOptionModel},
    enums::attribute::AttributeDataType,
};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One selectable value of an enum attribute, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeOptionInfo {
    pub id: i32,
    pub option_value: String,
    pub sort_order: i32,
}

impl From<AttributeOptionModel> for AttributeOptionInfo {
    fn from(model: AttributeOptionModel) -> Self {
        Self {
            id: model.id,
            option_value: model.option_value,
            sort_order: model.sort_order,
        }
    }
}

/// Attribute as served to the admin client, options included when enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub id: i32,
    pub name: String,
    pub data_type: AttributeDataType,
    pub is_filterable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub options: Vec<AttributeOptionInfo>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AttributeInfo {
    pub fn from_models(attribute: AttributeModel, options: Vec<AttributeOptionModel>) -> Self {
        Self {
            id: attribute.id,
            name: attribute.name,
            data_type: attribute.data_type,
            is_filterable: attribute.is_filterable,
            unit: attribute.unit,
            options: options.into_iter().map(Into::into).collect(),
            created_at: attribute.created_at,
            updated_at: attribute.updated_at,
        }
    }

    /// Option values in stored order; empty for non-enum attributes.
    pub fn option_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|o| o.option_value.as_str())
            .collect()
    }
}

/// Create/update body for an attribute. The same shape is used for both,
/// matching the admin client: updates are full replacements.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_attribute_payload", skip_on_field_errors = false))]
pub struct AttributePayload {
    pub name: String,
    pub data_type: AttributeDataType,
    #[serde(default = "default_filterable")]
    pub is_filterable: bool,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_filterable() -> bool {
    true
}

impl AttributePayload {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Options trimmed, in submitted order.
    pub fn trimmed_options(&self) -> Vec<String> {
        self.options.iter().map(|o| o.trim().to_string()).collect()
    }

    pub fn active_model(&self) -> AttributeActiveModel {
        AttributeActiveModel {
            name: Set(self.trimmed_name().to_string()),
            data_type: Set(self.data_type),
            is_filterable: Set(self.is_filterable),
            unit: Set(self
                .unit
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)),
            ..Default::default()
        }
    }
}

fn validate_attribute_payload(payload: &AttributePayload) -> Result<(), ValidationError> {
    if payload.trimmed_name().is_empty() {
        return Err(schema_error("name", "name is required"));
    }

    let options = payload.trimmed_options();
    match payload.data_type {
        AttributeDataType::Enum => {
            if options.is_empty() {
                return Err(schema_error(
                    "options",
                    "an enum attribute requires at least one option",
                ));
            }
            if options.iter().any(|o| o.is_empty()) {
                return Err(schema_error("options", "options must be non-empty"));
            }
            for (i, option) in options.iter().enumerate() {
                if options[..i].contains(option) {
                    return Err(schema_error(
                        "options",
                        &format!("duplicate option value: '{option}'"),
                    ));
                }
            }
        }
        _ => {
            if !options.is_empty() {
                return Err(schema_error(
                    "options",
                    "options are only allowed for enum attributes",
                ));
            }
        }
    }
    Ok(())
}
