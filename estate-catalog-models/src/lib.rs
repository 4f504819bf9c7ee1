pub mod constants;
pub mod domain;
pub mod entities;
pub mod enums;
pub mod settings;
pub mod web;
