//! digi.dev/v1 policy api types

use crate::crd::YieldPolicy;
use crate::error::Result;
use crate::runtime::{Registry, Scheme};
use tracing::debug;

/// Install the policy api types into `scheme`
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<()> {
    debug!("Adding digi.dev/v1 policy types to scheme");
    scheme.add::<YieldPolicy>();
    Ok(())
}

/// Register [`add_to_scheme`] with the start-up registry
pub fn register(registry: &mut Registry) {
    registry.add_to_scheme(add_to_scheme);
}
