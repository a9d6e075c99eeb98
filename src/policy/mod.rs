//! Policy Runtime
//!
//! The digi.dev/v1 policy api group and its controllers, registered
//! explicitly with a [`Registry`].

pub mod apis;
pub mod controller;

use crate::runtime::Registry;

/// Registry with the policy types and controllers installed
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    apis::register(&mut registry);
    controller::register(&mut registry);
    registry
}
