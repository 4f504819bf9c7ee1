pub mod attribute;
pub mod attribute_option;
pub mod prelude;
pub mod property;
pub mod property_type;
pub mod type_attribute_link;
