//! Document mappings for repository entities.

pub mod user;
