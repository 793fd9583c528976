//! Binary class names.
//!
//! A class name is kept in the internal binary form used by class files:
//! package segments separated by `/`, nested classes joined with `$`
//! (e.g. `a/b/C$D`). Names are immutable and cheap to clone.

use crate::{CoreError, CoreResult};
use std::fmt;
use std::sync::Arc;

/// Package separator in binary names.
pub const PACKAGE_SEPARATOR: char = '/';

/// Separator between an outer class and its nested simple name.
pub const INNER_CLASS_SEPARATOR: char = '$';

/// Suffix of compiled class files.
pub const CLASS_FILE_EXTENSION: &str = ".class";

/// The binary name of a class, compared and hashed by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(Arc<str>);

impl ClassName {
    /// Create a class name from its binary form, e.g. `a/b/C$D`.
    pub fn new(binary_name: impl AsRef<str>) -> CoreResult<Self> {
        let binary_name = binary_name.as_ref();
        if binary_name.is_empty() {
            return Err(CoreError::invalid_class_name(binary_name, "empty name"));
        }
        if binary_name.contains('.') {
            return Err(CoreError::invalid_class_name(
                binary_name,
                "binary names use '/' as package separator",
            ));
        }
        if binary_name.split(PACKAGE_SEPARATOR).any(str::is_empty) {
            return Err(CoreError::invalid_class_name(
                binary_name,
                "empty package segment",
            ));
        }
        Ok(Self(Arc::from(binary_name)))
    }

    /// Create a class name from its source-level qualified form, e.g. `a.b.C$D`.
    pub fn from_qualified(qualified_name: impl AsRef<str>) -> CoreResult<Self> {
        Self::new(qualified_name.as_ref().replace('.', "/"))
    }

    /// The binary name, e.g. `a/b/C$D`.
    pub fn binary_name(&self) -> &str {
        &self.0
    }

    /// The qualified name with `.` package separators, e.g. `a.b.C$D`.
    pub fn qualified_name(&self) -> String {
        self.0.replace(PACKAGE_SEPARATOR, ".")
    }

    /// The package in binary form; empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.0.rfind(PACKAGE_SEPARATOR) {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }

    /// The name after the last package separator, e.g. `C$D`.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind(PACKAGE_SEPARATOR) {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Derive the nested class `self$simple_name`.
    ///
    /// The simple name must satisfy [`is_valid_simple_name`].
    pub fn inner_class(&self, simple_name: &str) -> ClassName {
        debug_assert!(is_valid_simple_name(simple_name));
        Self(Arc::from(format!(
            "{}{}{}",
            self.0, INNER_CLASS_SEPARATOR, simple_name
        )))
    }

    /// The archive path of the compiled class, e.g. `a/b/C$D.class`.
    pub fn class_file_path_name(&self) -> String {
        self.file_path_name(CLASS_FILE_EXTENSION)
    }

    /// The archive path of the compiled class with a custom extension.
    pub fn file_path_name(&self, extension: &str) -> String {
        // Binary names already use the archive path separator.
        format!("{}{}", self.0, extension)
    }

    /// Move the class into another package, keeping its simple name.
    pub fn with_package(&self, package: &str) -> ClassName {
        if package.is_empty() {
            Self(Arc::from(self.simple_name()))
        } else {
            Self(Arc::from(format!(
                "{}{}{}",
                package.trim_end_matches(PACKAGE_SEPARATOR),
                PACKAGE_SEPARATOR,
                self.simple_name()
            )))
        }
    }
}

/// Returns true if `name` can be appended as a nested class simple name.
pub fn is_valid_simple_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(PACKAGE_SEPARATOR) && !name.contains('.')
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ClassName {
    type Error = CoreError;

    fn try_from(value: &str) -> CoreResult<Self> {
        Self::new(value)
    }
}
