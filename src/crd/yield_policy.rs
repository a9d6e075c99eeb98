//! YieldPolicy CRD
//!
//! Declares which mounts of a target model a policy governs. The policy
//! controller reads these; its reconcile logic lives elsewhere.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{deserialize_mount_refs, Auri, Mount, MountRefs};

// =============================================================================
// YieldPolicy CRD
// =============================================================================

/// YieldPolicy governs the mounts of a target model.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "digi.dev",
    version = "v1",
    kind = "YieldPolicy",
    plural = "yieldpolicies",
    shortname = "yp",
    printcolumn = r#"{"name": "Target", "type": "string", "jsonPath": ".spec.target.name"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct YieldPolicySpec {
    /// Model whose mounts are governed
    pub target: Auri,

    /// Governed mounts, keyed by the mount target's namespaced name
    #[serde(default, deserialize_with = "deserialize_mount_refs")]
    pub mounts: MountRefs,
}

impl YieldPolicy {
    /// Get the policy name
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Check if a mount key is governed by this policy
    pub fn governs(&self, key: &str) -> bool {
        self.spec.mounts.contains_key(key)
    }

    /// Governed mounts that are currently active
    pub fn active_mounts(&self) -> impl Iterator<Item = &Mount> {
        self.spec.mounts.values().filter(|m| m.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, MOUNT_ACTIVE_STATUS, MOUNT_INACTIVE_STATUS};
    use kube::{CustomResourceExt, Resource};
    use serde_json::json;

    fn lamp(name: &str) -> Auri {
        Auri::new(Kind::new("digi.dev", "v1", "Lamp"), "default", name)
    }

    fn policy() -> YieldPolicy {
        let room = Auri::new(Kind::new("digi.dev", "v1", "Room"), "default", "living");
        let mut spec = YieldPolicySpec {
            target: room.clone(),
            mounts: MountRefs::new(),
        };
        for (name, status) in [("l1", MOUNT_ACTIVE_STATUS), ("l2", MOUNT_INACTIVE_STATUS)] {
            let mount = Mount {
                status: status.into(),
                ..Mount::new(lamp(name), room.clone())
            };
            spec.mounts.insert(format!("default/{}", name), mount);
        }
        YieldPolicy::new("living-policy", spec)
    }

    #[test]
    fn test_resource_identity() {
        assert_eq!(YieldPolicy::group(&()), "digi.dev");
        assert_eq!(YieldPolicy::kind(&()), "YieldPolicy");
        assert_eq!(YieldPolicy::plural(&()), "yieldpolicies");
        assert_eq!(YieldPolicy::crd_name(), "yieldpolicies.digi.dev");
    }

    #[test]
    fn test_naive_plural_differs() {
        // the declared plural is irregular
        assert_eq!(Kind::of::<YieldPolicy>().plural(), "yieldpolicys");
    }

    #[test]
    fn test_governed_mounts() {
        let policy = policy();
        assert_eq!(policy.name(), "living-policy");
        assert!(policy.governs("default/l1"));
        assert!(!policy.governs("default/l3"));

        let active: Vec<&str> = policy.active_mounts().map(|m| m.source.name.as_str()).collect();
        assert_eq!(active, vec!["l1"]);
    }

    #[test]
    fn test_spec_json_shape() {
        let value = serde_json::to_value(&policy().spec).unwrap();
        assert_eq!(value["target"]["namespace"], "default");
        assert_eq!(value["mounts"]["default/l1"]["status"], "active");
        assert_eq!(value["mounts"]["default/l2"]["source"]["name"], "l2");
    }

    #[test]
    fn test_spec_skips_null_mounts() {
        let spec: YieldPolicySpec = serde_json::from_value(json!({
            "target": {"kind": {"group": "digi.dev", "version": "v1", "name": "Room"}, "name": "living"},
            "mounts": {"default/l1": null}
        }))
        .unwrap();
        assert!(spec.mounts.is_empty());

        let spec: YieldPolicySpec = serde_json::from_value(json!({"target": {"kind": {}}})).unwrap();
        assert!(spec.mounts.is_empty());
    }
}
