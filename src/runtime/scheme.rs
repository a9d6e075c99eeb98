//! Scheme
//!
//! Maps registered kinds to the api resources used to reach them.

use crate::error::{Error, Result};
use crate::model::{Auri, AuriRef, Kind};
use indexmap::IndexMap;
use kube::core::ApiResource;
use kube::Resource;
use tracing::debug;

/// Insertion-ordered set of registered kinds
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: IndexMap<Kind, ApiResource>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed resource
    pub fn add<K: Resource<DynamicType = ()>>(&mut self) {
        let kind = Kind::of::<K>();
        let api_resource = ApiResource::erase::<K>(&());
        self.insert(kind, api_resource);
    }

    /// Register a kind by name, using its naive plural
    pub fn add_kind(&mut self, kind: Kind) {
        let api_resource = kind.api_resource();
        self.insert(kind, api_resource);
    }

    fn insert(&mut self, kind: Kind, api_resource: ApiResource) {
        // first registration wins; re-adding keeps its position and plural
        if self.kinds.contains_key(&kind) {
            debug!("Kind {} already registered", kind);
            return;
        }
        debug!("Registering kind {} as {}", kind, api_resource.plural);
        self.kinds.insert(kind, api_resource);
    }

    pub fn contains(&self, kind: &Kind) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn api_resource(&self, kind: &Kind) -> Option<&ApiResource> {
        self.kinds.get(kind)
    }

    /// Registered kind served under `group/version/plural`
    pub fn kind_for_plural(&self, group: &str, version: &str, plural: &str) -> Option<&Kind> {
        self.kinds
            .iter()
            .find(|(_, ar)| ar.group == group && ar.version == version && ar.plural == plural)
            .map(|(kind, _)| kind)
    }

    /// Turn a parsed auri into an [`Auri`] of a registered kind
    pub fn resolve_auri(&self, auri: AuriRef) -> Result<Auri> {
        let kind = self
            .kind_for_plural(&auri.group, &auri.version, &auri.resource)
            .cloned()
            .ok_or_else(|| Error::KindNotRegistered {
                kind: crate::model::gvr_string(&auri.gvr()),
            })?;
        Ok(auri.into_auri(kind))
    }

    /// Parse an auri string against the registered kinds
    pub fn parse_auri(&self, s: &str) -> Result<Auri> {
        self.resolve_auri(s.parse()?)
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.kinds.keys()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
