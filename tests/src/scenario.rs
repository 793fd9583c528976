//! Scenario definitions.
//!
//! A scenario declares nests and tracked members with plain binary names and
//! materializes them into the records the registry consumes.

use desugar_core::{ClassAttributeRecord, ClassMemberKey, ClassMemberRecord, ClassName, MemberUseKind};
use desugar_registry::{CompanionRegistry, CompanionRegistryBuilder, NestConfig};

use crate::error::{ScenarioError, ScenarioResult};

#[derive(Debug, Clone)]
enum Declaration {
    NestHost { class_name: String, host: String },
    NestMember { host: String, member: String },
    MemberUse {
        owner: String,
        name: String,
        descriptor: String,
        kind: MemberUseKind,
    },
}

/// A set of nests and member uses to feed into a registry.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    declarations: Vec<Declaration>,
    config: NestConfig,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            config: NestConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a complete nest: the host lists itself and every member, and
    /// every member names the host.
    pub fn nest(mut self, host: &str, members: &[&str]) -> Self {
        self = self.nest_member(host, host);
        for member in members {
            self = self.nest_member(host, member).nest_host(member, host);
        }
        self
    }

    /// Declare a `NestHost` attribute.
    pub fn nest_host(mut self, class_name: &str, host: &str) -> Self {
        self.declarations.push(Declaration::NestHost {
            class_name: class_name.to_string(),
            host: host.to_string(),
        });
        self
    }

    /// Declare a `NestMembers` entry.
    pub fn nest_member(mut self, host: &str, member: &str) -> Self {
        self.declarations.push(Declaration::NestMember {
            host: host.to_string(),
            member: member.to_string(),
        });
        self
    }

    /// Track a constructor invoked from another nest member.
    pub fn tracked_constructor(self, owner: &str, descriptor: &str) -> Self {
        self.member_use(owner, "<init>", descriptor, MemberUseKind::InvokeSpecial)
    }

    pub fn member_use(mut self, owner: &str, name: &str, descriptor: &str, kind: MemberUseKind) -> Self {
        self.declarations.push(Declaration::MemberUse {
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            kind,
        });
        self
    }

    pub fn config(mut self, config: NestConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a class name in the context of this scenario.
    pub fn class(&self, binary_name: &str) -> ScenarioResult<ClassName> {
        ClassName::new(binary_name).map_err(|e| ScenarioError::class_name(&self.name, e))
    }

    /// Build the records described by the scenario.
    pub fn records(&self) -> ScenarioResult<(ClassMemberRecord, ClassAttributeRecord)> {
        let mut members = ClassMemberRecord::new();
        let mut attributes = ClassAttributeRecord::new();
        for declaration in &self.declarations {
            match declaration {
                Declaration::NestHost { class_name, host } => {
                    attributes.set_nest_host(self.class(class_name)?, self.class(host)?);
                }
                Declaration::NestMember { host, member } => {
                    attributes.add_nest_member(self.class(host)?, self.class(member)?);
                }
                Declaration::MemberUse {
                    owner,
                    name,
                    descriptor,
                    kind,
                } => {
                    let key = ClassMemberKey::new(self.class(owner)?, name, descriptor);
                    members.log_member_use(key, *kind);
                }
            }
        }
        Ok((members, attributes))
    }

    /// The unprepared registry.
    pub fn builder(&self) -> ScenarioResult<CompanionRegistryBuilder> {
        let (members, attributes) = self.records()?;
        Ok(CompanionRegistryBuilder::new(members, attributes).config(self.config.clone()))
    }

    /// The prepared registry.
    pub fn prepare(&self) -> ScenarioResult<CompanionRegistry> {
        tracing::debug!(scenario = %self.name, declarations = self.declarations.len(), "preparing scenario");
        Ok(self.builder()?.prepare()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nest_declares_both_directions() {
        let scenario = Scenario::new("nest").nest("a/H", &["a/H$M"]);

        let (_, attributes) = scenario.records().unwrap();

        let host = ClassName::new("a/H").unwrap();
        let member = ClassName::new("a/H$M").unwrap();
        assert_eq!(attributes.get(&member).unwrap().nest_host, Some(host.clone()));
        assert!(attributes.get(&host).unwrap().nest_members.contains(&member));
        assert_eq!(attributes.get(&host).unwrap().nest_host, None);
    }

    #[test]
    fn test_bad_class_name_is_reported() {
        let scenario = Scenario::new("bad").nest("a.H", &[]);

        let result = scenario.records();

        assert!(matches!(result, Err(ScenarioError::ClassName { .. })));
    }
}
