//! Tagged-union value model for dynamic property attributes.
//!
//! Property records store an open map of attribute id → raw JSON value.
//! Instead of trusting that map, every value is coerced through
//! [`AttributeValue`] against the attribute's declared `data_type` (and
//! option set for enums) at write time.

use super::attribute::AttributeInfo;
use crate::enums::attribute::AttributeDataType;
use estate_catalog_error::{ECError, ECResult};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Decimal(f64),
    Bool(bool),
    /// A selected option of an enum attribute.
    Choice(String),
}

impl AttributeValue {
    /// Coerces a raw JSON value against the attribute's declared type.
    ///
    /// Integers are accepted for decimal attributes; the reverse is not.
    pub fn from_json(raw: &JsonValue, attribute: &AttributeInfo) -> ECResult<Self> {
        let name = &attribute.name;
        match attribute.data_type {
            AttributeDataType::String => raw
                .as_str()
                .map(|s| Self::Str(s.to_string()))
                .ok_or_else(|| invalid(name, "a string", raw)),
            AttributeDataType::Integer => raw
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| invalid(name, "an integer", raw)),
            AttributeDataType::Decimal => raw
                .as_f64()
                .map(Self::Decimal)
                .ok_or_else(|| invalid(name, "a number", raw)),
            AttributeDataType::Boolean => raw
                .as_bool()
                .map(Self::Bool)
                .ok_or_else(|| invalid(name, "a boolean", raw)),
            AttributeDataType::Enum => {
                let value = raw
                    .as_str()
                    .ok_or_else(|| invalid(name, "an option string", raw))?;
                if attribute.option_values().contains(&value) {
                    Ok(Self::Choice(value.to_string()))
                } else {
                    Err(ECError::InvalidValue(format!(
                        "'{value}' is not an option of '{name}'"
                    )))
                }
            }
        }
    }
}

fn invalid(name: &str, expected: &str, raw: &JsonValue) -> ECError {
    ECError::InvalidValue(format!("'{name}' expects {expected}, got {raw}"))
}

/// Validates a property's dynamic value map against a type's scope.
///
/// Every key must be the decimal id of an attribute inside the scope and
/// every value must coerce under that attribute's declared type. Attributes
/// absent from the map are fine; the admin does not require every field.
pub fn validate_property_values(
    scope: &[AttributeInfo],
    values: &Map<String, JsonValue>,
) -> ECResult<()> {
    for (key, raw) in values {
        let id: i32 = key
            .parse()
            .map_err(|_| ECError::InvalidValue(format!("'{key}' is not an attribute id")))?;
        let attribute = scope.iter().find(|a| a.id == id).ok_or_else(|| {
            ECError::InvalidValue(format!("attribute {id} is not in the type's scope"))
        })?;
        AttributeValue::from_json(raw, attribute)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attr(id: i32, name: &str, data_type: AttributeDataType, options: &[&str]) -> AttributeInfo {
        AttributeInfo {
            id,
            name: name.to_string(),
            data_type,
            is_filterable: true,
            unit: None,
            options: options
                .iter()
                .enumerate()
                .map(|(i, o)| super::super::attribute::AttributeOptionInfo {
                    id: i as i32 + 1,
                    option_value: o.to_string(),
                    sort_order: i as i32,
                })
                .collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn coerces_each_declared_type() {
        let pool = attr(1, "Pool", AttributeDataType::Boolean, &[]);
        let surface = attr(2, "Surface", AttributeDataType::Decimal, &[]);
        let color = attr(3, "Color", AttributeDataType::Enum, &["red", "blue"]);

        assert_eq!(
            AttributeValue::from_json(&json!(true), &pool).unwrap(),
            AttributeValue::Bool(true)
        );
        // Integer literals are valid decimals.
        assert_eq!(
            AttributeValue::from_json(&json!(120), &surface).unwrap(),
            AttributeValue::Decimal(120.0)
        );
        assert_eq!(
            AttributeValue::from_json(&json!("red"), &color).unwrap(),
            AttributeValue::Choice("red".to_string())
        );
    }

    #[test]
    fn rejects_mismatched_values() {
        let count = attr(1, "Rooms", AttributeDataType::Integer, &[]);
        assert!(AttributeValue::from_json(&json!(2.5), &count).is_err());
        assert!(AttributeValue::from_json(&json!("3"), &count).is_err());

        let color = attr(2, "Color", AttributeDataType::Enum, &["red"]);
        assert!(AttributeValue::from_json(&json!("green"), &color).is_err());
    }

    #[test]
    fn scope_validation_rejects_unknown_keys() {
        let scope = vec![attr(1, "Pool", AttributeDataType::Boolean, &[])];
        let mut values = Map::new();
        values.insert("99".to_string(), json!(true));
        assert!(validate_property_values(&scope, &values).is_err());

        let mut values = Map::new();
        values.insert("pool".to_string(), json!(true));
        assert!(validate_property_values(&scope, &values).is_err());
    }

    #[test]
    fn scope_validation_allows_partial_maps() {
        let scope = vec![
            attr(1, "Pool", AttributeDataType::Boolean, &[]),
            attr(2, "Surface", AttributeDataType::Decimal, &[]),
        ];
        let mut values = Map::new();
        values.insert("1".to_string(), json!(false));
        assert!(validate_property_values(&scope, &values).is_ok());
    }
}
