//! Configuration for nest companion generation.

use crate::{NestError, NestResult};
use desugar_core::{is_valid_simple_name, ClassName, CLASS_FILE_EXTENSION};
use serde::{Deserialize, Serialize};

/// Simple name of the synthetic nested class carrying a nest's bridges.
pub const NEST_COMPANION_CLASS_SIMPLE_NAME: &str = "NestCC";

/// Configuration for nest companion generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestConfig {
    /// Simple name appended to a nest host to name its companion.
    pub companion_simple_name: String,
    /// Extension of emitted companion files.
    pub class_file_extension: String,
    /// Seal companions on the rayon pool instead of the calling thread.
    pub parallel_sealing: bool,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            companion_simple_name: NEST_COMPANION_CLASS_SIMPLE_NAME.to_string(),
            class_file_extension: CLASS_FILE_EXTENSION.to_string(),
            parallel_sealing: true,
        }
    }
}

impl NestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(source: &str) -> NestResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_companion_simple_name(mut self, name: impl Into<String>) -> Self {
        self.companion_simple_name = name.into();
        self
    }

    pub fn with_class_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.class_file_extension = extension.into();
        self
    }

    pub fn with_parallel_sealing(mut self, enabled: bool) -> Self {
        self.parallel_sealing = enabled;
        self
    }

    /// Check that the values can name companions and their files.
    pub fn validate(&self) -> NestResult<()> {
        if !is_valid_simple_name(&self.companion_simple_name) {
            return Err(NestError::invalid_config(format!(
                "companion simple name '{}' is not a valid simple name",
                self.companion_simple_name
            )));
        }
        if !self.class_file_extension.starts_with('.') {
            return Err(NestError::invalid_config(format!(
                "class file extension '{}' must start with '.'",
                self.class_file_extension
            )));
        }
        Ok(())
    }

    /// The companion of a nest host. Depends on the host name alone.
    pub fn companion_of(&self, nest_host: &ClassName) -> ClassName {
        nest_host.inner_class(&self.companion_simple_name)
    }

    /// Output path of a companion class.
    pub fn output_path(&self, companion: &ClassName) -> String {
        companion.file_path_name(&self.class_file_extension)
    }
}
