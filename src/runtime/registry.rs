//! Start-up Registry
//!
//! Collects scheme hooks and manager hooks through explicit registration
//! calls, then runs them in order during [`bootstrap`].

use crate::error::Result;
use tracing::{debug, info};

use super::manager::Manager;
use super::scheme::Scheme;

/// Installs api types into a scheme
pub type SchemeHook = Box<dyn Fn(&mut Scheme) -> Result<()> + Send + Sync>;

/// Constructs controllers and adds them to a manager
pub type ManagerHook = Box<dyn Fn(&mut Manager) -> Result<()> + Send + Sync>;

/// Ordered start-up hooks
///
/// Hooks are not de-duplicated: registering one twice runs it twice.
#[derive(Default)]
pub struct Registry {
    add_to_schemes: Vec<SchemeHook>,
    add_to_manager_funcs: Vec<ManagerHook>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_scheme<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Scheme) -> Result<()> + Send + Sync + 'static,
    {
        self.add_to_schemes.push(Box::new(hook));
        self
    }

    pub fn add_to_manager<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Manager) -> Result<()> + Send + Sync + 'static,
    {
        self.add_to_manager_funcs.push(Box::new(hook));
        self
    }

    pub fn scheme_hooks(&self) -> usize {
        self.add_to_schemes.len()
    }

    pub fn manager_hooks(&self) -> usize {
        self.add_to_manager_funcs.len()
    }

    /// Run every scheme hook in order against `scheme`
    pub fn install_schemes(&self, scheme: &mut Scheme) -> Result<()> {
        for (i, hook) in self.add_to_schemes.iter().enumerate() {
            debug!("Running scheme hook {}", i);
            hook(scheme)?;
        }
        Ok(())
    }

    /// Run every manager hook in order against `manager`
    pub fn install_controllers(&self, manager: &mut Manager) -> Result<()> {
        for (i, hook) in self.add_to_manager_funcs.iter().enumerate() {
            debug!("Running manager hook {}", i);
            hook(manager)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("add_to_schemes", &self.add_to_schemes.len())
            .field("add_to_manager_funcs", &self.add_to_manager_funcs.len())
            .finish()
    }
}

/// Build a manager: fill a fresh scheme, then install controllers.
///
/// The first failing hook aborts with its error.
pub fn bootstrap(registry: &Registry) -> Result<Manager> {
    info!(
        "Bootstrapping manager ({} scheme hooks, {} manager hooks)",
        registry.scheme_hooks(),
        registry.manager_hooks()
    );

    let mut scheme = Scheme::new();
    registry.install_schemes(&mut scheme)?;
    info!("Scheme ready with {} kinds", scheme.len());

    let mut manager = Manager::new(scheme);
    registry.install_controllers(&mut manager)?;
    info!("Manager ready with {} controllers", manager.controllers().len());

    Ok(manager)
}
