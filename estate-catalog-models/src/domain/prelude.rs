use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::domain::{
    attribute::{AttributeInfo, AttributeOptionInfo, AttributePayload},
    property::{NewProperty, PropertyInfo},
    property_type::{PropertyTypeInfo, PropertyTypeWithAttributes, ScopePayload, TypePayload},
    value::{validate_property_values, AttributeValue},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct PathId {
    pub id: i32,
}
