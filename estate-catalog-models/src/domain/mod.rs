pub mod attribute;
pub mod common;
pub mod prelude;
pub mod property;
pub mod property_type;
pub mod value;
