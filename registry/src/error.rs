//! Nest registry error types.

use desugar_core::ClassName;
use thiserror::Error;

/// Errors raised by the nest companion registry.
///
/// None of these are recoverable: they point at a caller that broke the
/// prepare/rewrite/produce ordering or at a bug in nest resolution.
#[derive(Debug, Error)]
pub enum NestError {
    /// A companion was written to or sealed after it had been sealed.
    #[error("Nest companion {companion} is already sealed")]
    AlreadySealed { companion: ClassName },

    /// A companion was requested for a class outside any nest.
    #[error("Expected the presence of a nest host of {class_name} to get its nest companion")]
    MissingNestHost { class_name: ClassName },

    /// A companion has no writer behind it.
    #[error("Expected a companion writer for {companion}")]
    MissingCompanionWriter { companion: ClassName },

    /// Renaming mapped two distinct nest hosts onto one class.
    #[error("Renaming maps nest hosts {first} and {second} onto {renamed}")]
    HostCollision {
        first: ClassName,
        second: ClassName,
        renamed: ClassName,
    },

    /// A companion name is already taken by a class of another nest.
    #[error("Nest companion {companion} of {nest_host} collides with another nest class")]
    CompanionClash {
        companion: ClassName,
        nest_host: ClassName,
    },

    /// Renaming sends a companion somewhere other than the companion of its renamed host.
    #[error("Renaming maps nest companion {companion} onto {mapped}, expected {expected}")]
    CompanionDiverged {
        companion: ClassName,
        mapped: ClassName,
        expected: ClassName,
    },

    /// Configuration values are out of range.
    #[error("Invalid nest configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("Failed to parse nest configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl NestError {
    pub fn already_sealed(companion: &ClassName) -> Self {
        Self::AlreadySealed {
            companion: companion.clone(),
        }
    }

    pub fn missing_nest_host(class_name: &ClassName) -> Self {
        Self::MissingNestHost {
            class_name: class_name.clone(),
        }
    }

    pub fn missing_companion_writer(companion: &ClassName) -> Self {
        Self::MissingCompanionWriter {
            companion: companion.clone(),
        }
    }

    pub fn companion_clash(companion: &ClassName, nest_host: &ClassName) -> Self {
        Self::CompanionClash {
            companion: companion.clone(),
            nest_host: nest_host.clone(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type for nest registry operations.
pub type NestResult<T> = Result<T, NestError>;
