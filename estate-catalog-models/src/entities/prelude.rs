pub use super::attribute::{
    ActiveModel as AttributeActiveModel, Column as AttributeColumn, Entity as Attribute,
    Model as AttributeModel,
};
pub use super::attribute_option::{
    ActiveModel as AttributeOptionActiveModel, Column as AttributeOptionColumn,
    Entity as AttributeOption, Model as AttributeOptionModel,
};
pub use super::property::{
    ActiveModel as PropertyActiveModel, Column as PropertyColumn, Entity as Property,
    Model as PropertyModel,
};
pub use super::property_type::{
    ActiveModel as PropertyTypeActiveModel, Column as PropertyTypeColumn, Entity as PropertyType,
    Model as PropertyTypeModel,
};
pub use super::type_attribute_link::{
    ActiveModel as TypeAttributeLinkActiveModel, Column as TypeAttributeLinkColumn,
    Entity as TypeAttributeLink, Model as TypeAttributeLinkModel,
};
