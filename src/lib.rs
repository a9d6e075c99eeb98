//! digi-core - Models, mounts and start-up glue for digis
//!
//! Digis are devices and spaces modeled as Kubernetes custom resources.
//! This crate addresses them, relates them and wires their controllers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Addressing                            │
//! │   Kind ── gvk/gvr ──▶ kube        Auri ── g/v/r/ns/name.path │
//! ├──────────────────────────────────────────────────────────────┤
//! │                         Relations                            │
//! │   Mount { source, target, mode, status }   MountRefs         │
//! ├──────────────────────────────────────────────────────────────┤
//! │                       Start-up glue                          │
//! │   Registry ──▶ Scheme hooks ──▶ Manager hooks ──▶ Manager     │
//! │                    ▲                 ▲                        │
//! │              policy::apis    policy::controller               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`model`]: Kind/Auri addressing and the Mount relation
//! - [`crd`]: Custom Resource Definitions
//! - [`runtime`]: Scheme, Manager and the start-up Registry
//! - [`policy`]: digi.dev/v1 policy types and controllers
//! - [`error`]: Error types and handling

pub mod crd;
pub mod error;
pub mod model;
pub mod policy;
pub mod runtime;

// Re-export commonly used types
pub use model::{
    attr_path_slice, Auri, AuriRef, Kind, Mount, MountRefs, SpacedName, DEFAULT_MOUNT_MODE,
    DEFAULT_NAMESPACE,
};

pub use crd::{YieldPolicy, YieldPolicySpec};

pub use error::{Error, Result};

pub use runtime::{bootstrap, ControllerRegistration, Manager, Registry, Scheme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
