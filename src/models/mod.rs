// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod amount;
pub mod announcement;
pub mod contribution;
pub mod event;
pub mod patch;
pub mod payment;
pub mod photo;
pub mod user;

pub use announcement::*;
pub use contribution::*;
pub use event::*;
pub use payment::*;
pub use photo::*;
pub use user::*;
