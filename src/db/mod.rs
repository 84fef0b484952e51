// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod announcement_repository;
pub mod contribution_repository;
pub mod event_repository;
pub mod payment_repository;
pub mod photo_repository;
pub mod schema_repository;
pub mod user_repository;

pub use announcement_repository::*;
pub use contribution_repository::*;
pub use event_repository::*;
pub use payment_repository::*;
pub use photo_repository::*;
pub use schema_repository::*;
pub use user_repository::*;
