//! Common utilities shared by the user service crates.
//!
//! This crate provides:
//! - Unified error handling for the document and blob store paths
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
