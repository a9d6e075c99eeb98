//! Start-up Runtime
//!
//! Wires api types and controllers together before the manager runs:
//! a [`Registry`] of hooks fills a [`Scheme`] and a [`Manager`].

pub mod manager;
pub mod registry;
pub mod scheme;

pub use manager::*;
pub use registry::*;
pub use scheme::*;
