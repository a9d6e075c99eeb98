//! Mount relation
//!
//! A [`Mount`] links a source model to a target model: the target's
//! attributes under `.spec.mounts` are populated from the source.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::attr::{lookup_attr, trim_attrs};
use super::types::Auri;

// =============================================================================
// Constants
// =============================================================================

pub const MOUNT_ATTR_PATH: &str = ".spec.mounts";

/// [`MOUNT_ATTR_PATH`] split into components
pub const MOUNT_ATTR_PATH_SLICE: &[&str] = &["spec", "mounts"];

pub const MOUNT_MODE_ATTR_PATH: &str = ".mode";
pub const DEFAULT_MOUNT_MODE: &str = "expose";
pub const HIDE_MOUNT_MODE: &str = "hide";

pub const MOUNT_STATUS_ATTR_PATH: &str = ".status";
pub const MOUNT_ACTIVE_STATUS: &str = "active";
pub const MOUNT_INACTIVE_STATUS: &str = "inactive";

/// Attributes owned by the child that never flow down from a parent
const CHILD_OWNED_ATTRS: &[&str] = &["status", "output", "obs"];

/// Attribute holding a model's own mounts
const MOUNTS_ATTR: &str = "mounts";

// =============================================================================
// Mount
// =============================================================================

/// Directed link from `source` to `target`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Mount {
    #[serde(default)]
    pub source: Auri,

    #[serde(default)]
    pub target: Auri,

    /// Empty means [`DEFAULT_MOUNT_MODE`]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,

    /// [`MOUNT_ACTIVE_STATUS`] or [`MOUNT_INACTIVE_STATUS`]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

/// Mounts indexed by the target's namespaced name
pub type MountRefs = BTreeMap<String, Mount>;

/// Deserialize [`MountRefs`], dropping entries set to null.
///
/// A null entry is how a merge patch removes a mount.
pub fn deserialize_mount_refs<'de, D>(deserializer: D) -> std::result::Result<MountRefs, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<BTreeMap<String, Option<Mount>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, mount)| mount.map(|m| (key, m)))
        .collect())
}

impl Mount {
    pub fn new(source: Auri, target: Auri) -> Self {
        Self {
            source,
            target,
            mode: String::new(),
            status: String::new(),
        }
    }

    /// Mode with the default applied
    pub fn effective_mode(&self) -> &str {
        if self.mode.is_empty() {
            DEFAULT_MOUNT_MODE
        } else {
            &self.mode
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MOUNT_ACTIVE_STATUS
    }

    pub fn is_hidden(&self) -> bool {
        self.effective_mode() == HIDE_MOUNT_MODE
    }

    /// Key of this mount in [`MountRefs`]
    pub fn key(&self) -> String {
        self.target.spaced_name().to_string()
    }

    /// Part of a mounted child's spec the parent may push down.
    ///
    /// Inactive mounts push nothing. Child-owned attributes are dropped, and
    /// a hidden mount also keeps the child's own mounts out of view.
    pub fn child_view(&self, child_spec: &Value) -> Option<Value> {
        if !self.is_active() {
            return None;
        }

        let mut trimmed: Vec<&str> = CHILD_OWNED_ATTRS.to_vec();
        if self.is_hidden() {
            trimmed.push(MOUNTS_ATTR);
        }
        Some(trim_attrs(child_spec, &trimmed))
    }
}

/// Read the mounts a model participates in as target
pub fn mount_refs_from_model(model: &Value) -> Result<MountRefs> {
    match lookup_attr(model, MOUNT_ATTR_PATH) {
        None => Ok(MountRefs::new()),
        Some(value) => deserialize_mount_refs(value).map_err(|e| Error::MountParse {
            path: MOUNT_ATTR_PATH.to_string(),
            reason: e.to_string(),
        }),
    }
}
