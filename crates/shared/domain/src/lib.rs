//! Domain layer - the user record and the store conventions it lives under.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{NewUser, UpdateUser, User};
