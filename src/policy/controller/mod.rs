//! Policy controllers

pub mod yieldpolicy;

use crate::runtime::Registry;

/// Register every policy controller with the start-up registry
pub fn register(registry: &mut Registry) {
    registry.add_to_manager(yieldpolicy::add);
}
