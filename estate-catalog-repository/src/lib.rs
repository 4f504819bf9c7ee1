//! Data access for the catalog schema: attributes, property types, the
//! ordered scope linking them, and the property listings that consume it.
//!
//! Repositories are stateless unit structs generic over
//! [`sea_orm::ConnectionTrait`], so every method works both on a live
//! connection and inside an open transaction.

pub mod attribute;
pub mod property;
pub mod property_type;
pub mod scope;

pub use attribute::AttributeRepository;
pub use property::PropertyRepository;
pub use property_type::PropertyTypeRepository;
pub use scope::ScopeRepository;
