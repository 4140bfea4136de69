pub mod component;
pub mod config;
pub mod error;
pub mod mapping;
pub mod reader;
pub mod record;
pub mod schema;
pub mod value;
