//! Class members and the record of their use across nest boundaries.

use crate::{map_descriptor, ClassName, TypeMappable, TypeMapper, UsageFacts};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// Method name of instance initializers.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Identifies a field or method by owner, name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassMemberKey {
    pub owner: ClassName,
    pub name: String,
    pub descriptor: String,
}

impl ClassMemberKey {
    pub fn new(owner: ClassName, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Key of a constructor of `owner`.
    pub fn constructor(owner: ClassName, descriptor: impl Into<String>) -> Self {
        Self::new(owner, CONSTRUCTOR_NAME, descriptor)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

impl fmt::Display for ClassMemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner, self.name, self.descriptor)
    }
}

impl TypeMappable for ClassMemberKey {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        Self {
            owner: mapper.map(&self.owner),
            descriptor: map_descriptor(&self.descriptor, mapper),
            name: self.name,
        }
    }
}

/// How a member is used at a given site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberUseKind {
    GetField,
    PutField,
    GetStatic,
    PutStatic,
    InvokeVirtual,
    InvokeSpecial,
    InvokeStatic,
    InvokeInterface,
    /// The member is declared in a class of a nest.
    MemberDeclaration,
}

/// Why a member is tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingReason {
    /// Uses in first-seen order.
    pub use_kinds: IndexSet<MemberUseKind>,
}

impl TrackingReason {
    pub fn has_declaration(&self) -> bool {
        self.use_kinds.contains(&MemberUseKind::MemberDeclaration)
    }

    fn merge(&mut self, other: TrackingReason) {
        self.use_kinds.extend(other.use_kinds);
    }
}

/// Members of nest classes and their cross-class uses, in logging order.
#[derive(Debug, Clone, Default)]
pub struct ClassMemberRecord {
    reasons: IndexMap<ClassMemberKey, TrackingReason>,
}

impl ClassMemberRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the member is declared in a nest class.
    pub fn log_member_declaration(&mut self, member: ClassMemberKey) -> &mut Self {
        self.log_member_use(member, MemberUseKind::MemberDeclaration)
    }

    /// Record one use of the member.
    pub fn log_member_use(&mut self, member: ClassMemberKey, kind: MemberUseKind) -> &mut Self {
        self.reasons
            .entry(member)
            .or_default()
            .use_kinds
            .insert(kind);
        self
    }

    /// All tracked constructors in logging order.
    pub fn find_all_constructor_member_keys(&self) -> impl Iterator<Item = &ClassMemberKey> {
        self.reasons.keys().filter(|key| key.is_constructor())
    }

    /// Tracking reason of a member, if any.
    pub fn reason(&self, member: &ClassMemberKey) -> Option<&TrackingReason> {
        self.reasons.get(member)
    }

    /// Number of tracked members.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl UsageFacts for ClassMemberRecord {
    fn tracked_constructor_owners(&self) -> Vec<ClassName> {
        self.find_all_constructor_member_keys()
            .map(|key| key.owner.clone())
            .collect()
    }

    fn has_tracking_reason(&self, member: &ClassMemberKey) -> bool {
        self.reasons.contains_key(member)
    }

    fn usage_kinds(&self, member: &ClassMemberKey) -> IndexSet<MemberUseKind> {
        self.reasons
            .get(member)
            .map(|reason| reason.use_kinds.clone())
            .unwrap_or_default()
    }
}

impl TypeMappable for ClassMemberRecord {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        let mut reasons: IndexMap<ClassMemberKey, TrackingReason> =
            IndexMap::with_capacity(self.reasons.len());
        for (key, reason) in self.reasons {
            // Keys that collapse under the mapper pool their reasons.
            reasons
                .entry(key.accept_type_mapper(mapper))
                .or_default()
                .merge(reason);
        }
        Self { reasons }
    }
}
