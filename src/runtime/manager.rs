//! Manager
//!
//! Owns the scheme and the controllers installed at start-up.

use crate::error::{Error, Result};
use crate::model::Kind;
use serde::Serialize;
use tracing::info;

use super::scheme::Scheme;

/// A controller installed into the manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerRegistration {
    /// Unique controller name
    pub name: String,
    /// Kind the controller watches
    pub kind: Kind,
}

/// Holds the scheme and the ordered list of controllers
#[derive(Debug, Default)]
pub struct Manager {
    scheme: Scheme,
    controllers: Vec<ControllerRegistration>,
}

impl Manager {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            controllers: Vec::new(),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Install a controller watching `kind`.
    ///
    /// The kind must already be in the scheme and the name must be unused.
    pub fn add_controller(&mut self, name: impl Into<String>, kind: Kind) -> Result<()> {
        let name = name.into();

        if !self.scheme.contains(&kind) {
            return Err(Error::KindNotRegistered {
                kind: kind.to_string(),
            });
        }
        if self.controllers.iter().any(|c| c.name == name) {
            return Err(Error::ControllerExists { name });
        }

        info!("Adding controller {} for {}", name, kind);
        self.controllers.push(ControllerRegistration { name, kind });
        Ok(())
    }

    pub fn controller(&self, name: &str) -> Option<&ControllerRegistration> {
        self.controllers.iter().find(|c| c.name == name)
    }

    /// Controllers in installation order
    pub fn controllers(&self) -> &[ControllerRegistration] {
        &self.controllers
    }
}
