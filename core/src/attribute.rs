//! Nest attributes read from compiled classes.

use crate::{ClassName, NestFacts, TypeMappable, TypeMapper};
use indexmap::{IndexMap, IndexSet};

/// Nest-related attributes of a single class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassAttributes {
    /// Value of the `NestHost` attribute.
    pub nest_host: Option<ClassName>,
    /// Entries of the `NestMembers` attribute.
    pub nest_members: IndexSet<ClassName>,
}

impl TypeMappable for ClassAttributes {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        Self {
            nest_host: self.nest_host.accept_type_mapper(mapper),
            nest_members: self.nest_members.accept_type_mapper(mapper),
        }
    }
}

/// Nest attributes of every class seen so far.
#[derive(Debug, Clone, Default)]
pub struct ClassAttributeRecord {
    records: IndexMap<ClassName, ClassAttributes>,
}

impl ClassAttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the `NestHost` attribute of `class_name`.
    pub fn set_nest_host(&mut self, class_name: ClassName, nest_host: ClassName) -> &mut Self {
        self.records.entry(class_name).or_default().nest_host = Some(nest_host);
        self
    }

    /// Record one `NestMembers` entry of `class_name`.
    pub fn add_nest_member(&mut self, class_name: ClassName, member: ClassName) -> &mut Self {
        self.records
            .entry(class_name)
            .or_default()
            .nest_members
            .insert(member);
        self
    }

    /// Attributes of a class, if any were recorded.
    pub fn get(&self, class_name: &ClassName) -> Option<&ClassAttributes> {
        self.records.get(class_name)
    }

    /// All classes with recorded attributes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassName> {
        self.records.keys()
    }
}

impl NestFacts for ClassAttributeRecord {
    fn declared_host(&self, class_name: &ClassName) -> Option<ClassName> {
        self.records
            .get(class_name)
            .and_then(|attributes| attributes.nest_host.clone())
    }

    fn declared_members(&self, class_name: &ClassName) -> IndexSet<ClassName> {
        self.records
            .get(class_name)
            .map(|attributes| attributes.nest_members.clone())
            .unwrap_or_default()
    }
}

impl TypeMappable for ClassAttributeRecord {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        let mut records: IndexMap<ClassName, ClassAttributes> =
            IndexMap::with_capacity(self.records.len());
        for (class_name, attributes) in self.records {
            let attributes = attributes.accept_type_mapper(mapper);
            let merged = records.entry(mapper.map(&class_name)).or_default();
            if merged.nest_host.is_none() {
                merged.nest_host = attributes.nest_host;
            }
            merged.nest_members.extend(attributes.nest_members);
        }
        Self { records }
    }
}
