// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Schema migrations and data access for the community portal

pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;

pub use config::{init_db_pool, run_migrations, Config, MIGRATOR};
pub use errors::PortalError;
