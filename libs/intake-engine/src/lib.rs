pub mod config;
pub mod error;
pub mod ingest;
pub mod registry;
