//! Nest lookups that outlive artifact production.

use crate::companion::BinarySink;
use crate::resolver::{resolve, CompanionMapping, NestResolution};
use crate::{CompanionRegistry, NestConfig, NestError, NestResult};
use desugar_core::{ClassAttributeRecord, ClassMemberKey, ClassMemberRecord, ClassName, UsageFacts};

/// The registry after every companion was sealed. Read-only.
#[derive(Debug)]
pub struct FinalizedRegistry {
    member_record: ClassMemberRecord,
    attribute_record: ClassAttributeRecord,
    config: NestConfig,
    companions: CompanionMapping,
}

impl FinalizedRegistry {
    pub(crate) fn from_prepared<S: BinarySink>(registry: CompanionRegistry<S>) -> Self {
        let (member_record, attribute_record, config, companions, _writers) =
            registry.into_parts();
        Self {
            member_record,
            attribute_record,
            config,
            companions,
        }
    }

    pub fn resolve(&self, class_name: &ClassName) -> NestResolution {
        resolve(class_name, &self.attribute_record, &self.companions)
    }

    pub fn nest_host(&self, class_name: &ClassName) -> Option<ClassName> {
        self.resolve(class_name).into_host(class_name)
    }

    pub fn companion_identifier(&self, class_name: &ClassName) -> NestResult<ClassName> {
        self.nest_host(class_name)
            .map(|nest_host| self.config.companion_of(&nest_host))
            .ok_or_else(|| NestError::missing_nest_host(class_name))
    }

    /// Every generated companion, in production order.
    pub fn all_companion_identifiers(&self) -> Vec<ClassName> {
        self.companions
            .iter()
            .map(|(companion, _)| companion.clone())
            .collect()
    }

    pub fn has_any_tracking_reason(&self, member: &ClassMemberKey) -> bool {
        self.member_record.has_tracking_reason(member)
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }
}
