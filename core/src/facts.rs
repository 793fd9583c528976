//! Read-only views over facts gathered by earlier analysis passes.

use crate::{ClassMemberKey, ClassName, MemberUseKind};
use indexmap::IndexSet;

/// Nest attributes declared by compiled classes.
pub trait NestFacts {
    /// The class named by the `NestHost` attribute of `class_name`, if any.
    fn declared_host(&self, class_name: &ClassName) -> Option<ClassName>;

    /// The classes listed in the `NestMembers` attribute of `class_name`.
    fn declared_members(&self, class_name: &ClassName) -> IndexSet<ClassName>;
}

/// Cross-class member usage tracked within nests.
pub trait UsageFacts {
    /// Owners of every tracked constructor, in tracking order.
    fn tracked_constructor_owners(&self) -> Vec<ClassName>;

    /// Whether the member was recorded for any reason.
    fn has_tracking_reason(&self, member: &ClassMemberKey) -> bool;

    /// Every recorded use of the member.
    fn usage_kinds(&self, member: &ClassMemberKey) -> IndexSet<MemberUseKind>;
}
