//! Desugar Nest Registry
//!
//! Nest companions for targets without nest-based private access.
//! Every nest host owning a constructor reached from another nest member gets
//! one synthetic companion class to carry its bridges.
//!
//! The registry moves through three states, each its own type:
//! - `CompanionRegistryBuilder`: facts collected, nothing allocated
//! - `CompanionRegistry`: companions allocated, shared by rewriting tasks
//! - `FinalizedRegistry`: companions sealed into `CompanionFile`s

mod artifact;
mod builder;
mod companion;
mod config;
mod error;
mod finalized;
mod registry;
mod resolver;

pub use artifact::{produce_artifacts, CompanionFile, FileContentProvider};
pub use builder::{CompanionRegistryBuilder, SinkFactory};
pub use companion::{BinarySink, ByteSink, CompanionWriter};
pub use config::{NestConfig, NEST_COMPANION_CLASS_SIMPLE_NAME};
pub use error::{NestError, NestResult};
pub use finalized::FinalizedRegistry;
pub use registry::CompanionRegistry;
pub use resolver::{resolve, CompanionMapping, NestResolution};
