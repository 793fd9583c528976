//! Nest host resolution.

use crate::{NestError, NestResult};
use desugar_core::{ClassName, NestFacts};
use indexmap::{IndexMap, IndexSet};

/// Table from generated companion classes to the nest host they belong to.
///
/// Keys are always companions and values always real hosts; the table never
/// chains.
#[derive(Debug, Clone, Default)]
pub struct CompanionMapping {
    companion_to_host: IndexMap<ClassName, ClassName>,
    hosts: IndexSet<ClassName>,
}

impl CompanionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the companion of a host.
    ///
    /// Fails when an input class already carries the companion's name, or
    /// when the host is itself a registered companion.
    pub(crate) fn insert(&mut self, companion: ClassName, nest_host: ClassName) -> NestResult<()> {
        if self.companion_to_host.contains_key(&companion)
            || self.hosts.contains(&companion)
            || self.companion_to_host.contains_key(&nest_host)
        {
            return Err(NestError::companion_clash(&companion, &nest_host));
        }
        self.hosts.insert(nest_host.clone());
        self.companion_to_host.insert(companion, nest_host);
        Ok(())
    }

    /// The host of a registered companion.
    pub fn host_of(&self, companion: &ClassName) -> Option<&ClassName> {
        self.companion_to_host.get(companion)
    }

    /// Companion/host pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &ClassName)> {
        self.companion_to_host.iter()
    }

    pub fn len(&self) -> usize {
        self.companion_to_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companion_to_host.is_empty()
    }
}

/// Where a class sits relative to its nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestResolution {
    /// The class belongs to no nest.
    NoNest,
    /// The class hosts its own nest.
    SelfHost,
    /// The class belongs to the nest of another class.
    ExternalHost(ClassName),
}

impl NestResolution {
    /// The nest host, given the class that was resolved.
    pub fn into_host(self, class_name: &ClassName) -> Option<ClassName> {
        match self {
            NestResolution::NoNest => None,
            NestResolution::SelfHost => Some(class_name.clone()),
            NestResolution::ExternalHost(nest_host) => Some(nest_host),
        }
    }

    pub fn is_in_nest(&self) -> bool {
        !matches!(self, NestResolution::NoNest)
    }
}

/// Resolve the nest of a class.
///
/// Registered companions resolve through the table first: they carry no
/// attributes of their own. Otherwise the `NestHost` attribute decides, and a
/// class listing nest members without naming a host is its own host.
pub fn resolve(
    class_name: &ClassName,
    facts: &impl NestFacts,
    companions: &CompanionMapping,
) -> NestResolution {
    if let Some(nest_host) = companions.host_of(class_name) {
        return NestResolution::ExternalHost(nest_host.clone());
    }
    if let Some(nest_host) = facts.declared_host(class_name) {
        if &nest_host == class_name {
            return NestResolution::SelfHost;
        }
        return NestResolution::ExternalHost(nest_host);
    }
    if !facts.declared_members(class_name).is_empty() {
        return NestResolution::SelfHost;
    }
    NestResolution::NoNest
}
