//! Desugar Core Types
//!
//! This crate provides the language model shared by the desugaring passes:
//! - Binary class names (ClassName)
//! - Class members and their recorded uses (ClassMemberKey, ClassMemberRecord)
//! - Nest attributes of compiled classes (ClassAttributeRecord)
//! - Read-only fact views (NestFacts, UsageFacts)
//! - Class renaming (TypeMapper, TypeMappable)

mod attribute;
mod class_name;
mod error;
mod facts;
mod member;
mod type_mapper;

pub use attribute::*;
pub use class_name::*;
pub use error::*;
pub use facts::*;
pub use member::*;
pub use type_mapper::*;
