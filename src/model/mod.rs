//! Core model types
//!
//! - [`types`]: Kind and Auri addressing
//! - [`relation`]: Mount relation between models
//! - [`attr`]: attribute lookup in model documents

pub mod attr;
pub mod relation;
pub mod types;

pub use attr::*;
pub use relation::*;
pub use types::*;
