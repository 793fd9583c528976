//! Class renaming.
//!
//! A [`TypeMapper`] is a total function over class names. Values that hold
//! class names implement [`TypeMappable`] and are rebuilt through the mapper,
//! which lets a relocation pass run after nest analysis without redoing it.

use crate::ClassName;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::Hash;

/// A total renaming function over class names.
pub trait TypeMapper {
    /// Map a class name; names the mapper does not care about come back unchanged.
    fn map(&self, class_name: &ClassName) -> ClassName;
}

impl<F> TypeMapper for F
where
    F: Fn(&ClassName) -> ClassName,
{
    fn map(&self, class_name: &ClassName) -> ClassName {
        self(class_name)
    }
}

/// A value that can be rebuilt with every class name passed through a mapper.
pub trait TypeMappable: Sized {
    /// Consume the value and return its renamed equivalent.
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self;
}

impl TypeMappable for ClassName {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        mapper.map(&self)
    }
}

impl<T> TypeMappable for IndexSet<T>
where
    T: TypeMappable + Eq + Hash,
{
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        self.into_iter()
            .map(|item| item.accept_type_mapper(mapper))
            .collect()
    }
}

impl<T: TypeMappable> TypeMappable for Option<T> {
    fn accept_type_mapper(self, mapper: &impl TypeMapper) -> Self {
        self.map(|item| item.accept_type_mapper(mapper))
    }
}

/// Rewrite every class reference (`Lname;`) of a field or method descriptor.
pub fn map_descriptor(descriptor: &str, mapper: &impl TypeMapper) -> String {
    let mut mapped = String::with_capacity(descriptor.len());
    let mut rest = descriptor;
    while let Some(start) = rest.find('L') {
        mapped.push_str(&rest[..=start]);
        let tail = &rest[start + 1..];
        let Some(end) = tail.find(';') else {
            mapped.push_str(tail);
            return mapped;
        };
        match ClassName::new(&tail[..end]) {
            Ok(class_name) => mapped.push_str(mapper.map(&class_name).binary_name()),
            Err(_) => mapped.push_str(&tail[..end]),
        }
        mapped.push(';');
        rest = &tail[end + 1..];
    }
    mapped.push_str(rest);
    mapped
}

/// Table-driven relocation: exact renames first, then package prefix rules.
#[derive(Debug, Clone, Default)]
pub struct ClassNameRelocation {
    /// Exact class renames.
    classes: HashMap<ClassName, ClassName>,
    /// Package prefix rules in registration order.
    packages: Vec<(String, String)>,
}

impl ClassNameRelocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename one class exactly.
    pub fn rename_class(mut self, from: ClassName, to: ClassName) -> Self {
        self.classes.insert(from, to);
        self
    }

    /// Move every class under `from` (binary form, e.g. `a/b`) to `to`.
    pub fn relocate_package(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.packages.push((from.into(), to.into()));
        self
    }

    fn relocate(&self, class_name: &ClassName) -> Option<ClassName> {
        let binary = class_name.binary_name();
        for (from, to) in &self.packages {
            let Some(rest) = binary.strip_prefix(from.as_str()) else {
                continue;
            };
            // Only whole package segments match: `a/b` relocates `a/b/C`, not `a/bc/C`.
            let Some(rest) = rest.strip_prefix('/') else {
                continue;
            };
            let relocated = if to.is_empty() {
                rest.to_string()
            } else {
                format!("{}/{}", to, rest)
            };
            if let Ok(relocated) = ClassName::new(relocated) {
                return Some(relocated);
            }
        }
        None
    }
}

impl TypeMapper for ClassNameRelocation {
    fn map(&self, class_name: &ClassName) -> ClassName {
        if let Some(renamed) = self.classes.get(class_name) {
            return renamed.clone();
        }
        self.relocate(class_name)
            .unwrap_or_else(|| class_name.clone())
    }
}
