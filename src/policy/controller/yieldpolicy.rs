//! yieldpolicy controller registration

use crate::crd::YieldPolicy;
use crate::model::Kind;
use crate::error::Result;
use crate::runtime::Manager;

/// Controller name
pub const CONTROLLER_NAME: &str = "yieldpolicy";

/// Create the yieldpolicy controller and add it to `manager`
pub fn add(manager: &mut Manager) -> Result<()> {
    manager.add_controller(CONTROLLER_NAME, Kind::of::<YieldPolicy>())
}
