//! Kind and Auri addressing
//!
//! A [`Kind`] names a model schema (e.g. `digi.dev/v1/Lamp`); an [`Auri`]
//! points at a model, or at a set of attributes inside it, on the semantic
//! message bus. Rendered form:
//!
//! ```text
//! digi.dev/v1/roombas/default/roomba-foo.power
//! └──── gvr ────────┘ └── spaced name ─┘└path┘
//! ```

use crate::error::{Error, Result};
use kube::core::{ApiResource, GroupVersionKind, GroupVersionResource};
use kube::Resource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::attr::lookup_attr;

// =============================================================================
// Constants
// =============================================================================

/// Namespace assumed when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Separator between gvr and namespaced-name segments
pub const URI_SEPARATOR: char = '/';

/// Separator between attribute path components
pub const ATTR_PATH_SEPARATOR: char = '.';

// =============================================================================
// Kind
// =============================================================================

/// Identifies a model schema, e.g. `digi.dev/v1/Lamp`.
///
/// Mirrors [`GroupVersionKind`] with its own field names and JSON tags; use
/// [`Kind::gvk`] and [`Kind::gvr`] to cross into kube's types.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct Kind {
    /// Model schema group
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Schema version
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Schema name; first letter capitalized, e.g. Roomba
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Kind {
    pub fn new(group: impl Into<String>, version: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            name: name.into(),
        }
    }

    /// Kind of a typed kube resource
    pub fn of<K: Resource<DynamicType = ()>>() -> Self {
        Self::new(K::group(&()), K::version(&()), K::kind(&()))
    }

    /// Resource name: lowercased name plus `s`.
    ///
    /// Irregular plurals (Box, Bus) are not handled; callers pick names
    /// whose naive plural matches the served resource.
    pub fn plural(&self) -> String {
        format!("{}s", self.name.to_lowercase())
    }

    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.name)
    }

    pub fn gvr(&self) -> GroupVersionResource {
        GroupVersionResource::gvr(&self.group, &self.version, &self.plural())
    }

    /// Dynamic api resource for this kind, using the naive plural
    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(&self.gvk(), &self.plural())
    }
}

/// Renders `group/version/Name`, the slash form auris use, rather than
/// the `digi.dev/v1, Kind=Roomba` form of a Kubernetes gvk string.
impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.group, self.version, self.name)
    }
}

impl From<GroupVersionKind> for Kind {
    fn from(gvk: GroupVersionKind) -> Self {
        Self::new(gvk.group, gvk.version, gvk.kind)
    }
}

// =============================================================================
// GVR helpers
// =============================================================================

/// Render a gvr as `group/version/resource`
pub fn gvr_string(gvr: &GroupVersionResource) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        gvr.group,
        gvr.version,
        gvr.resource,
        sep = URI_SEPARATOR
    )
}

/// Parse `group/version/resource`, or `version/resource` for the core group
pub fn parse_gvr(s: &str) -> Result<GroupVersionResource> {
    let parts: Vec<&str> = s.split(URI_SEPARATOR).collect();
    let (group, version, resource) = match parts.as_slice() {
        [g, v, r] => (*g, *v, *r),
        [v, r] => ("", *v, *r),
        _ => {
            return Err(Error::GvrParse {
                input: s.to_string(),
                reason: format!("expected 2 or 3 segments, got {}", parts.len()),
            })
        }
    };

    if let Some(reason) = gvr_segment_error(version, resource) {
        return Err(Error::GvrParse {
            input: s.to_string(),
            reason: reason.to_string(),
        });
    }

    Ok(GroupVersionResource::gvr(group, version, resource))
}

/// Checks shared by every parser of a gvr prefix
fn gvr_segment_error(version: &str, resource: &str) -> Option<&'static str> {
    if version.is_empty() {
        Some("empty version segment")
    } else if resource.is_empty() {
        Some("empty resource segment")
    } else {
        None
    }
}

// =============================================================================
// Spaced Name
// =============================================================================

/// Namespace-qualified model name, rendered `namespace/name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpacedName {
    pub namespace: String,
    pub name: String,
}

impl SpacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse `namespace/name`; a bare name lands in the default namespace
    pub fn parse(s: &str) -> Self {
        match s.split_once(URI_SEPARATOR) {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    /// Rendered form with the default namespace omitted
    pub fn trimmed(&self) -> String {
        if self.namespace == DEFAULT_NAMESPACE {
            self.name.clone()
        } else {
            self.to_string()
        }
    }
}

impl std::fmt::Display for SpacedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.namespace, URI_SEPARATOR, self.name)
    }
}

// =============================================================================
// Auri
// =============================================================================

/// Identifies a set of attributes belonging to a model on the semantic
/// message bus, e.g. `digi.dev/v1/roombas/default/roomba-foo.power`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Auri {
    /// Model schema
    #[serde(default)]
    pub kind: Kind,

    /// Name of the model
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Namespace of the model
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Path to attribute(s) in the model; empty means the model itself
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl Auri {
    pub fn new(kind: Kind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            path: String::new(),
        }
    }

    /// Same model, pointing at `path`
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn gvk(&self) -> GroupVersionKind {
        self.kind.gvk()
    }

    pub fn gvr(&self) -> GroupVersionResource {
        self.kind.gvr()
    }

    pub fn spaced_name(&self) -> SpacedName {
        SpacedName::new(&self.namespace, &self.name)
    }

    /// Whether this points at the whole model rather than an attribute
    pub fn is_model(&self) -> bool {
        self.path.trim_start_matches(ATTR_PATH_SEPARATOR).is_empty()
    }

    /// Attribute of `model` this auri points at
    pub fn resolve<'a>(&self, model: &'a Value) -> Option<&'a Value> {
        lookup_attr(model, &self.path)
    }
}

impl std::fmt::Display for Auri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            gvr_string(&self.gvr()),
            URI_SEPARATOR,
            self.spaced_name()
        )?;
        if !self.path.is_empty() {
            write!(
                f,
                "{}{}",
                ATTR_PATH_SEPARATOR,
                self.path.trim_start_matches(ATTR_PATH_SEPARATOR)
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// AuriRef
// =============================================================================

/// A parsed auri string.
///
/// The rendered form carries the resource plural, not the kind name, so
/// parsing stops here; [`Scheme::resolve_auri`](crate::runtime::Scheme::resolve_auri)
/// turns it into an [`Auri`] by looking the plural up among registered kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuriRef {
    pub group: String,
    pub version: String,
    pub resource: String,
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl AuriRef {
    pub fn gvr(&self) -> GroupVersionResource {
        GroupVersionResource::gvr(&self.group, &self.version, &self.resource)
    }

    pub fn spaced_name(&self) -> SpacedName {
        SpacedName::new(&self.namespace, &self.name)
    }

    /// Attach the kind the plural belongs to
    pub fn into_auri(self, kind: Kind) -> Auri {
        Auri::new(kind, self.namespace, self.name).with_path(self.path)
    }
}

impl From<&Auri> for AuriRef {
    fn from(auri: &Auri) -> Self {
        Self {
            group: auri.kind.group.clone(),
            version: auri.kind.version.clone(),
            resource: auri.kind.plural(),
            namespace: auri.namespace.clone(),
            name: auri.name.clone(),
            path: auri.path.trim_start_matches(ATTR_PATH_SEPARATOR).to_string(),
        }
    }
}

impl std::fmt::Display for AuriRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            gvr_string(&self.gvr()),
            URI_SEPARATOR,
            self.spaced_name()
        )?;
        if !self.path.is_empty() {
            write!(f, "{}{}", ATTR_PATH_SEPARATOR, self.path)?;
        }
        Ok(())
    }
}

impl FromStr for AuriRef {
    type Err = Error;

    /// Parse the rendered form of an [`Auri`].
    ///
    /// The attribute path starts at the first `.` of the last segment, so
    /// model names containing dots do not round-trip.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(URI_SEPARATOR).collect();
        let [group, version, resource, namespace, last] = parts.as_slice() else {
            return Err(Error::AuriParse {
                input: s.to_string(),
                reason: format!("expected 5 segments, got {}", parts.len()),
            });
        };

        if let Some(reason) = gvr_segment_error(version, resource) {
            return Err(Error::AuriParse {
                input: s.to_string(),
                reason: reason.to_string(),
            });
        }

        let (name, path) = last.split_once(ATTR_PATH_SEPARATOR).unwrap_or((*last, ""));
        if name.is_empty() {
            return Err(Error::AuriParse {
                input: s.to_string(),
                reason: "empty model name".to_string(),
            });
        }

        Ok(Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            path: path.to_string(),
        })
    }
}

// =============================================================================
// Attribute Paths
// =============================================================================

/// Split a dot path into components; leading dots are optional.
///
/// An empty path yields a single empty component.
pub fn attr_path_slice(path: &str) -> Vec<&str> {
    path.trim_start_matches(ATTR_PATH_SEPARATOR)
        .split(ATTR_PATH_SEPARATOR)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn roomba() -> Kind {
        Kind::new("digi.dev", "v1", "Roomba")
    }

    #[test]
    fn test_plural() {
        assert_eq!(roomba().plural(), "roombas");
        assert_eq!(Kind::new("", "v1", "UniLamp").plural(), "unilamps");
        // irregular plurals stay naive
        assert_eq!(Kind::new("digi.dev", "v1", "Box").plural(), "boxs");
    }

    #[test]
    fn test_gvk_gvr() {
        let gvk = roomba().gvk();
        assert_eq!(gvk.group, "digi.dev");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Roomba");

        let gvr = roomba().gvr();
        assert_eq!(gvr.resource, "roombas");
        assert_eq!(gvr_string(&gvr), "digi.dev/v1/roombas");

        let empty = Kind::default().gvr();
        assert_eq!(empty.group, "");
        assert_eq!(empty.resource, "s");
    }

    #[test]
    fn test_kind_display_and_from_gvk() {
        assert_eq!(roomba().to_string(), "digi.dev/v1/Roomba");
        assert_eq!(Kind::new("", "v1", "Pod").to_string(), "/v1/Pod");
        let gvk = GroupVersionKind::gvk("digi.dev", "v1", "Lamp");
        assert_eq!(Kind::from(gvk), Kind::new("digi.dev", "v1", "Lamp"));
    }

    #[test]
    fn test_api_resource() {
        let ar = roomba().api_resource();
        assert_eq!(ar.plural, "roombas");
        assert_eq!(ar.kind, "Roomba");
        assert_eq!(ar.api_version, "digi.dev/v1");
    }

    #[test]
    fn test_auri_display() {
        let auri = Auri::new(roomba(), "default", "roomba-foo").with_path("power");
        assert_eq!(auri.to_string(), "digi.dev/v1/roombas/default/roomba-foo.power");

        let model = Auri::new(roomba(), "default", "roomba-foo");
        assert_eq!(model.to_string(), "digi.dev/v1/roombas/default/roomba-foo");
    }

    #[test]
    fn test_auri_display_strips_leading_dots() {
        let plain = Auri::new(roomba(), "home", "r1").with_path("foo.bar");
        let dotted = Auri::new(roomba(), "home", "r1").with_path(".foo.bar");
        let doubled = Auri::new(roomba(), "home", "r1").with_path("..foo.bar");
        assert_eq!(plain.to_string(), "digi.dev/v1/roombas/home/r1.foo.bar");
        assert_eq!(plain.to_string(), dotted.to_string());
        assert_eq!(plain.to_string(), doubled.to_string());
    }

    #[test]
    fn test_auri_ref_parse() {
        let parsed: AuriRef = "digi.dev/v1/roombas/default/roomba-foo.power".parse().unwrap();
        assert_eq!(parsed.group, "digi.dev");
        assert_eq!(parsed.resource, "roombas");
        assert_eq!(parsed.namespace, "default");
        assert_eq!(parsed.name, "roomba-foo");
        assert_eq!(parsed.path, "power");

        let auri = parsed.into_auri(roomba());
        assert_eq!(auri.to_string(), "digi.dev/v1/roombas/default/roomba-foo.power");

        let nested: AuriRef = "digi.dev/v1/lamps/home/l1.spec.mounts".parse().unwrap();
        assert_eq!(nested.name, "l1");
        assert_eq!(nested.path, "spec.mounts");
        assert_eq!(nested.to_string(), "digi.dev/v1/lamps/home/l1.spec.mounts");
    }

    #[test]
    fn test_auri_ref_from_auri() {
        let auri = Auri::new(Kind::new("digi.dev", "v1", "UniLamp"), "home", "l1").with_path(".power");
        let parsed: AuriRef = auri.to_string().parse().unwrap();
        assert_eq!(parsed, AuriRef::from(&auri));
        assert_eq!(parsed.resource, "unilamps");
    }

    #[test]
    fn test_auri_ref_parse_errors() {
        assert_matches!(
            "digi.dev/v1/lamps/l1".parse::<AuriRef>(),
            Err(Error::AuriParse { .. })
        );
        assert_matches!(
            "digi.dev/v1//default/l1".parse::<AuriRef>(),
            Err(Error::AuriParse { .. })
        );
        assert_matches!(
            "digi.dev/v1/lamps/default/.power".parse::<AuriRef>(),
            Err(Error::AuriParse { .. })
        );
    }

    #[test]
    fn test_empty_version_rejected_by_both_parsers() {
        assert_matches!(
            "digi.dev//lamps/default/l1".parse::<AuriRef>(),
            Err(Error::AuriParse { reason, .. }) if reason == "empty version segment"
        );
        assert_matches!(
            parse_gvr("digi.dev//lamps"),
            Err(Error::GvrParse { reason, .. }) if reason == "empty version segment"
        );
    }

    #[test]
    fn test_auri_json_shape() {
        let auri = Auri::new(roomba(), "default", "roomba-foo");
        let value = serde_json::to_value(&auri).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": {"group": "digi.dev", "version": "v1", "name": "Roomba"},
                "name": "roomba-foo",
                "namespace": "default"
            })
        );

        // nested kind is emitted even when empty
        let empty = serde_json::to_value(Auri::default()).unwrap();
        assert_eq!(empty, json!({"kind": {}}));

        let back: Auri = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(back.name, "x");
        assert_eq!(back.kind, Kind::default());
    }

    #[test]
    fn test_auri_resolve() {
        let model = json!({"spec": {"power": {"intent": "on"}}});
        let auri = Auri::new(roomba(), "default", "r1").with_path(".spec.power.intent");
        assert_eq!(auri.resolve(&model), Some(&json!("on")));

        let whole = Auri::new(roomba(), "default", "r1");
        assert_eq!(whole.resolve(&model), Some(&model));

        let missing = whole.with_path("spec.brightness");
        assert_eq!(missing.resolve(&model), None);
    }

    #[test]
    fn test_spaced_name() {
        let auri = Auri::new(roomba(), "home", "r1");
        assert_eq!(auri.spaced_name().to_string(), "home/r1");

        assert_eq!(SpacedName::parse("home/r1"), SpacedName::new("home", "r1"));
        assert_eq!(SpacedName::parse("r1"), SpacedName::new(DEFAULT_NAMESPACE, "r1"));
        assert_eq!(SpacedName::parse("default/r1").trimmed(), "r1");
        assert_eq!(SpacedName::parse("home/r1").trimmed(), "home/r1");
    }

    #[test]
    fn test_parse_gvr() {
        let gvr = parse_gvr("digi.dev/v1/lamps").unwrap();
        assert_eq!(gvr.group, "digi.dev");
        assert_eq!(gvr.resource, "lamps");

        let core = parse_gvr("v1/pods").unwrap();
        assert_eq!(core.group, "");
        assert_eq!(core.version, "v1");

        assert_matches!(parse_gvr("lamps"), Err(Error::GvrParse { .. }));
        assert_matches!(parse_gvr("digi.dev/v1/"), Err(Error::GvrParse { .. }));
    }

    #[test]
    fn test_attr_path_slice() {
        assert_eq!(attr_path_slice(".a.b"), vec!["a", "b"]);
        assert_eq!(attr_path_slice("a.b"), vec!["a", "b"]);
        assert_eq!(attr_path_slice(""), vec![""]);
        assert_eq!(attr_path_slice("..power"), vec!["power"]);
    }
}
