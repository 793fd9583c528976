//! The CompanionRegistry - prepared nest lookups and companion writers.

use crate::artifact::{produce_artifacts, CompanionFile};
use crate::companion::{BinarySink, ByteSink, CompanionWriter};
use crate::resolver::{resolve, CompanionMapping, NestResolution};
use crate::{FinalizedRegistry, NestConfig, NestError, NestResult};
use desugar_core::{
    ClassAttributeRecord, ClassMemberKey, ClassMemberRecord, ClassName, MemberUseKind,
    TypeMappable, TypeMapper, UsageFacts,
};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Prepared nest companions, shared by the rewriting tasks.
///
/// Lookups take `&self` and never mutate the tables; the only mutation in
/// this phase goes through the per-host [`CompanionWriter`]s. Producing the
/// artifacts consumes the registry, so every rewriting task must have
/// released its borrow first.
#[derive(Debug)]
pub struct CompanionRegistry<S = ByteSink> {
    member_record: ClassMemberRecord,
    attribute_record: ClassAttributeRecord,
    config: NestConfig,
    /// Companion to host.
    companions: CompanionMapping,
    /// Host to writer, in registration order.
    writers: IndexMap<ClassName, CompanionWriter<S>>,
}

impl<S: BinarySink> CompanionRegistry<S> {
    pub(crate) fn new(
        member_record: ClassMemberRecord,
        attribute_record: ClassAttributeRecord,
        config: NestConfig,
        companions: CompanionMapping,
        writers: IndexMap<ClassName, CompanionWriter<S>>,
    ) -> Self {
        Self {
            member_record,
            attribute_record,
            config,
            companions,
            writers,
        }
    }

    // ==================== Nest Lookups ====================

    /// Where a class sits relative to its nest.
    pub fn resolve(&self, class_name: &ClassName) -> NestResolution {
        resolve(class_name, &self.attribute_record, &self.companions)
    }

    /// The nest host of a class, or `None` outside any nest.
    ///
    /// A generated companion and its host count as nest member and host.
    pub fn nest_host(&self, class_name: &ClassName) -> Option<ClassName> {
        self.resolve(class_name).into_host(class_name)
    }

    /// The companion of the nest containing `class_name`.
    ///
    /// e.g. the companion of `a/b/C$D` is `a/b/C$NestCC`. Only meaningful for
    /// classes known to be in a nest; check [`nest_host`](Self::nest_host)
    /// first when unsure.
    pub fn companion_identifier(&self, class_name: &ClassName) -> NestResult<ClassName> {
        self.nest_host(class_name)
            .map(|nest_host| self.config.companion_of(&nest_host))
            .ok_or_else(|| NestError::missing_nest_host(class_name))
    }

    /// The writer of the companion of the nest containing `class_name`.
    pub fn companion_writer(&self, class_name: &ClassName) -> Option<&CompanionWriter<S>> {
        self.nest_host(class_name)
            .and_then(|nest_host| self.writers.get(&nest_host))
    }

    /// Every companion to generate, in registration order.
    pub fn all_companion_identifiers(&self) -> Vec<ClassName> {
        self.writers
            .keys()
            .map(|nest_host| self.config.companion_of(nest_host))
            .collect()
    }

    /// Binary names of every companion to generate.
    pub fn all_companion_class_names(&self) -> Vec<String> {
        self.all_companion_identifiers()
            .iter()
            .map(|companion| companion.binary_name().to_string())
            .collect()
    }

    /// Nest hosts with a companion, in registration order.
    pub fn nest_hosts(&self) -> impl Iterator<Item = &ClassName> {
        self.writers.keys()
    }

    pub fn companion_mapping(&self) -> &CompanionMapping {
        &self.companions
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    // ==================== Usage Lookups ====================

    pub fn has_any_tracking_reason(&self, member: &ClassMemberKey) -> bool {
        self.member_record.has_tracking_reason(member)
    }

    pub fn has_any_use(&self, member: &ClassMemberKey, kind: MemberUseKind) -> bool {
        self.find_all_member_use_kinds(member).contains(&kind)
    }

    pub fn find_all_member_use_kinds(&self, member: &ClassMemberKey) -> IndexSet<MemberUseKind> {
        self.member_record.usage_kinds(member)
    }

    // ==================== Lifecycle ====================

    /// Seal every companion and hand out its output file.
    pub fn produce_artifacts(self) -> NestResult<(FinalizedRegistry, Vec<CompanionFile>)> {
        produce_artifacts(self)
    }

    /// Rename every class held by the registry.
    ///
    /// Companions go through the mapper like every other class and keep what
    /// was written to them. The mapped companion must still be the companion
    /// of the mapped host, and two hosts may not collapse into one name;
    /// either case is rejected.
    pub fn accept_type_mapper(self, mapper: &impl TypeMapper) -> NestResult<Self> {
        let mut original_hosts: HashMap<ClassName, ClassName> =
            HashMap::with_capacity(self.writers.len());
        let mut companions = CompanionMapping::new();
        let mut writers = IndexMap::with_capacity(self.writers.len());

        for (nest_host, writer) in self.writers {
            let renamed = mapper.map(&nest_host);
            if let Some(first) = original_hosts.get(&renamed) {
                tracing::warn!(%first, second = %nest_host, %renamed, "nest hosts collide after renaming");
                return Err(NestError::HostCollision {
                    first: first.clone(),
                    second: nest_host,
                    renamed,
                });
            }

            let companion = self.config.companion_of(&renamed);
            let mapped = mapper.map(writer.companion());
            if mapped != companion {
                tracing::warn!(companion = %writer.companion(), %mapped, expected = %companion, "nest companion diverges from its host after renaming");
                return Err(NestError::CompanionDiverged {
                    companion: writer.companion().clone(),
                    mapped,
                    expected: companion,
                });
            }
            original_hosts.insert(renamed.clone(), nest_host);

            companions.insert(companion.clone(), renamed.clone())?;
            writers.insert(renamed.clone(), writer.rename(renamed, companion));
        }

        Ok(Self {
            member_record: self.member_record.accept_type_mapper(mapper),
            attribute_record: self.attribute_record.accept_type_mapper(mapper),
            config: self.config,
            companions,
            writers,
        })
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        ClassMemberRecord,
        ClassAttributeRecord,
        NestConfig,
        CompanionMapping,
        IndexMap<ClassName, CompanionWriter<S>>,
    ) {
        (
            self.member_record,
            self.attribute_record,
            self.config,
            self.companions,
            self.writers,
        )
    }
}
