use sea_orm::{ActiveValue, DeriveActiveEnum, EnumIter, IntoActiveValue};
use sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Declared value type of a catalog attribute.
///
/// Stored as its lowercase wire form, which is also what the admin client
/// sends and renders.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(16))",
    rename_all = "lowercase"
)]
#[serde(rename_all = "lowercase")]
pub enum AttributeDataType {
    String,
    Integer,
    Decimal,
    Boolean,
    Enum,
}

impl AttributeDataType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
        }
    }
}

impl Display for AttributeDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

impl IntoActiveValue<AttributeDataType> for AttributeDataType {
    fn into_active_value(self) -> ActiveValue<AttributeDataType> {
        ActiveValue::Set(self)
    }
}
