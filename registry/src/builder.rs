//! CompanionRegistryBuilder: the unprepared registry.

use crate::companion::{BinarySink, ByteSink, CompanionWriter};
use crate::resolver::{resolve, CompanionMapping};
use crate::{CompanionRegistry, NestConfig, NestResult};
use desugar_core::{
    ClassAttributeRecord, ClassMemberRecord, ClassName, TypeMappable, TypeMapper, UsageFacts,
};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// Creates the sink of a companion, given the companion's name.
pub type SinkFactory<S> = Box<dyn Fn(&ClassName) -> S + Send + Sync>;

/// Collects the facts needed to allocate nest companions.
///
/// The only way forward is [`prepare`](Self::prepare), which consumes the
/// builder; lookups live on the prepared [`CompanionRegistry`].
pub struct CompanionRegistryBuilder<S = ByteSink> {
    member_record: ClassMemberRecord,
    attribute_record: ClassAttributeRecord,
    config: NestConfig,
    sink_factory: SinkFactory<S>,
}

impl CompanionRegistryBuilder<ByteSink> {
    /// Create a builder whose companions are written into [`ByteSink`]s.
    pub fn new(member_record: ClassMemberRecord, attribute_record: ClassAttributeRecord) -> Self {
        Self::with_sink_factory(member_record, attribute_record, |_| ByteSink::new())
    }
}

impl<S: BinarySink> CompanionRegistryBuilder<S> {
    /// Create a builder with a custom sink for each companion.
    pub fn with_sink_factory(
        member_record: ClassMemberRecord,
        attribute_record: ClassAttributeRecord,
        sink_factory: impl Fn(&ClassName) -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            member_record,
            attribute_record,
            config: NestConfig::default(),
            sink_factory: Box::new(sink_factory),
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: NestConfig) -> Self {
        self.config = config;
        self
    }

    /// Allocate one companion for every nest host owning a tracked constructor.
    ///
    /// Hosts are registered in the order their first constructor was tracked,
    /// so enumeration is reproducible for the same input.
    pub fn prepare(self) -> NestResult<CompanionRegistry<S>> {
        self.config.validate()?;

        let owners = self.member_record.tracked_constructor_owners();
        let unregistered = CompanionMapping::new();
        let nest_hosts: IndexSet<ClassName> = owners
            .iter()
            .filter_map(|owner| {
                resolve(owner, &self.attribute_record, &unregistered).into_host(owner)
            })
            .collect();

        let mut companions = CompanionMapping::new();
        let mut writers = IndexMap::with_capacity(nest_hosts.len());
        for nest_host in nest_hosts {
            let companion = self.config.companion_of(&nest_host);
            tracing::trace!(%nest_host, %companion, "allocating nest companion");
            let sink = (self.sink_factory)(&companion);
            companions.insert(companion.clone(), nest_host.clone())?;
            writers.insert(
                nest_host.clone(),
                CompanionWriter::new(nest_host, companion, sink),
            );
        }

        tracing::debug!(
            tracked_constructors = owners.len(),
            companions = writers.len(),
            "prepared nest companions"
        );

        Ok(CompanionRegistry::new(
            self.member_record,
            self.attribute_record,
            self.config,
            companions,
            writers,
        ))
    }
}

impl<S: BinarySink> TypeMappable for CompanionRegistryBuilder<S> {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        Self {
            member_record: self.member_record.accept_type_mapper(mapper),
            attribute_record: self.attribute_record.accept_type_mapper(mapper),
            ..self
        }
    }
}

impl<S> fmt::Debug for CompanionRegistryBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanionRegistryBuilder")
            .field("member_record", &self.member_record)
            .field("attribute_record", &self.attribute_record)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
